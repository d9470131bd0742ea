//! SVG renderer for laid-out view trees
//!
//! Every view becomes a `<rect>` with CSS classes for its role, so a
//! stylesheet can tell real content apart from the transparent views that
//! only exist for layout.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::render_svg;
