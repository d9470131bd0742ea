//! Stack Layout - declarative stack layouts for a retained view toolkit
//!
//! Describe a screen as nested rows, columns, insets and spacings, realize it
//! into a [`ViewTree`] and install it into a destination view. The containers
//! and spacers it creates never swallow taps.
//!
//! # Example
//!
//! ```rust
//! use stack_layout::{Axis, LayoutBuilder, Size, ViewSpec, ViewTree};
//!
//! let tree = ViewTree::new();
//! let window = tree.create_window(Size::new(320.0, 480.0));
//! let label = tree.create_view(ViewSpec::new().with_intrinsic_size(Size::new(100.0, 20.0)));
//!
//! let b = LayoutBuilder::new(&tree);
//! b.inset(16.0, Axis::Horizontal, b.rows(vec![b.view(label)]).unwrap())
//!     .unwrap()
//!     .install(&tree, window)
//!     .unwrap();
//! tree.layout(window).unwrap();
//!
//! let frame = tree.absolute_frame(label).unwrap();
//! assert_eq!(frame.x.round(), 110.0);
//! ```

pub mod demo;
pub mod layout;
pub mod renderer;
pub mod stylesheet;
pub mod toolkit;

pub use demo::{Demo, DemoConfig, DemoError, DemoState};
pub use layout::{
    Alignment, Edge, Edges, InstallOptions, Installed, LayoutBuilder, LayoutError, StackLayout,
};
pub use renderer::{render_svg, SvgConfig};
pub use stylesheet::Stylesheet;
pub use toolkit::{
    Axis, EdgeInsets, Point, Rect, Size, ToolkitError, ViewId, ViewSpec, ViewTree,
};
