//! Declarative stack layouts
//!
//! Compose [`StackLayout`] nodes bottom-up with a [`LayoutBuilder`] (views,
//! spacing, insets, rows and columns), then [`install`](StackLayout::install)
//! the root into a destination view. Every container and spacer the builder
//! creates is transparent to hit testing.

pub mod alignment;
pub mod error;
pub mod install;
pub mod stack_layout;
pub mod transparent;

pub use alignment::Alignment;
pub use error::LayoutError;
pub use install::{Edge, Edges, InstallOptions, Installed};
pub use stack_layout::{LayoutBuilder, StackLayout};
pub use transparent::{create_transparent_leaf, create_transparent_stack, pass_through};
