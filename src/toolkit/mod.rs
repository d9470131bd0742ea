//! A small retained view toolkit
//!
//! Views live in a [`ViewTree`] and are addressed by [`ViewId`]. Stack views
//! arrange their children along an axis; anchor constraints pin views to
//! each other. [`ViewTree::layout`] solves everything with a Cassowary
//! solver and writes frames back, and [`ViewTree::hit_test`] finds the view
//! that should receive a tap.

pub mod anchor;
mod arrangement;
pub mod error;
pub mod geometry;
pub mod solver;
pub mod tree;
pub mod view;

pub use anchor::{Anchor, AnchorRef, Constraint, ConstraintId};
pub use error::ToolkitError;
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use solver::SolverError;
pub use tree::ViewTree;
pub use view::{
    Axis, Distribution, HitTestHook, StackAlignment, StackConfig, ViewId, ViewKind, ViewSpec,
};
