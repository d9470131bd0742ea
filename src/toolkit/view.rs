//! Views: the retained elements owned by a [`ViewTree`](super::ViewTree)

use std::fmt;

use super::geometry::{Rect, Size};

/// Handle to a view inside a [`ViewTree`](super::ViewTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) usize);

impl ViewId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arrangement direction of a stack view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis
    pub fn cross(&self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// How a stack view positions its arranged subviews across its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackAlignment {
    Leading,
    Center,
    Trailing,
    Fill,
}

/// How a stack view shares space along its axis.
///
/// Only `Fill` exists: children take their own sizes and the stack's edges
/// are pinned to the first and last child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Distribution {
    #[default]
    Fill,
}

/// Configuration of a stack view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    pub axis: Axis,
    pub alignment: StackAlignment,
    pub distribution: Distribution,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            alignment: StackAlignment::Fill,
            distribution: Distribution::Fill,
        }
    }
}

/// What kind of view this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Plain,
    Stack(StackConfig),
}

/// Hook consulted after standard hit testing.
///
/// Receives the view being tested and the standard result (the view itself,
/// a descendant, or `None`) and returns the result to report.
pub type HitTestHook = fn(ViewId, Option<ViewId>) -> Option<ViewId>;

/// Creation options for a view
#[derive(Debug, Clone)]
pub struct ViewSpec {
    pub name: Option<String>,
    pub intrinsic_width: Option<f64>,
    pub intrinsic_height: Option<f64>,
    /// Non-interactive views (and their subtrees) never receive hits
    pub interactive: bool,
    pub text: Option<String>,
    pub hit_test_hook: Option<HitTestHook>,
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self {
            name: None,
            intrinsic_width: None,
            intrinsic_height: None,
            interactive: true,
            text: None,
            hit_test_hook: None,
        }
    }
}

impl ViewSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_intrinsic_size(mut self, size: Size) -> Self {
        self.intrinsic_width = Some(size.width);
        self.intrinsic_height = Some(size.height);
        self
    }

    pub fn with_intrinsic_width(mut self, width: f64) -> Self {
        self.intrinsic_width = Some(width);
        self
    }

    pub fn with_intrinsic_height(mut self, height: f64) -> Self {
        self.intrinsic_height = Some(height);
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_hit_test_hook(mut self, hook: HitTestHook) -> Self {
        self.hit_test_hook = Some(hook);
        self
    }
}

/// A view as stored in the tree
#[derive(Debug, Clone)]
pub(crate) struct ViewNode {
    pub spec: ViewSpec,
    pub kind: ViewKind,
    pub parent: Option<ViewId>,
    pub subviews: Vec<ViewId>,
    pub arranged_subviews: Vec<ViewId>,
    pub translates_autoresizing_mask: bool,
    /// Frame in the parent's coordinate space
    pub frame: Rect,
}

impl ViewNode {
    pub fn new(spec: ViewSpec, kind: ViewKind) -> Self {
        Self {
            spec,
            kind,
            parent: None,
            subviews: Vec::new(),
            arranged_subviews: Vec::new(),
            translates_autoresizing_mask: true,
            frame: Rect::zero(),
        }
    }

    pub fn stack_config(&self) -> Option<StackConfig> {
        match self.kind {
            ViewKind::Stack(config) => Some(config),
            ViewKind::Plain => None,
        }
    }
}
