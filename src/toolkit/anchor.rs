//! Layout anchors and the equality constraints callers activate between them

use std::fmt;

use super::view::{Axis, ViewId};

/// An edge, dimension or center line of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Left,
    Right,
    Top,
    Bottom,
    Width,
    Height,
    CenterX,
    CenterY,
}

impl Anchor {
    /// The size anchor along an axis
    pub fn dimension(axis: Axis) -> Anchor {
        match axis {
            Axis::Horizontal => Anchor::Width,
            Axis::Vertical => Anchor::Height,
        }
    }

    /// The edge where arrangement along an axis starts
    pub fn leading(axis: Axis) -> Anchor {
        match axis {
            Axis::Horizontal => Anchor::Left,
            Axis::Vertical => Anchor::Top,
        }
    }

    /// The edge where arrangement along an axis ends
    pub fn trailing(axis: Axis) -> Anchor {
        match axis {
            Axis::Horizontal => Anchor::Right,
            Axis::Vertical => Anchor::Bottom,
        }
    }

    pub fn center(axis: Axis) -> Anchor {
        match axis {
            Axis::Horizontal => Anchor::CenterX,
            Axis::Vertical => Anchor::CenterY,
        }
    }
}

/// An anchor on a specific view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorRef {
    pub view: ViewId,
    pub anchor: Anchor,
}

impl AnchorRef {
    pub fn new(view: ViewId, anchor: Anchor) -> Self {
        Self { view, anchor }
    }
}

impl ViewId {
    pub fn anchor(self, anchor: Anchor) -> AnchorRef {
        AnchorRef::new(self, anchor)
    }

    pub fn left(self) -> AnchorRef {
        self.anchor(Anchor::Left)
    }

    pub fn right(self) -> AnchorRef {
        self.anchor(Anchor::Right)
    }

    pub fn top(self) -> AnchorRef {
        self.anchor(Anchor::Top)
    }

    pub fn bottom(self) -> AnchorRef {
        self.anchor(Anchor::Bottom)
    }

    pub fn width(self) -> AnchorRef {
        self.anchor(Anchor::Width)
    }

    pub fn height(self) -> AnchorRef {
        self.anchor(Anchor::Height)
    }
}

/// Handle to an activated constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub(crate) usize);

/// A required equality: `first = second + constant`, or `first = constant`
/// when there is no second anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub first: AnchorRef,
    pub second: Option<AnchorRef>,
    pub constant: f64,
}

impl Constraint {
    /// `first = second`
    pub fn equal(first: AnchorRef, second: AnchorRef) -> Self {
        Self {
            first,
            second: Some(second),
            constant: 0.0,
        }
    }

    /// `first = constant`
    pub fn equal_to_constant(first: AnchorRef, constant: f64) -> Self {
        Self {
            first,
            second: None,
            constant,
        }
    }

    /// Add an offset to the right-hand side
    pub fn offset(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    /// Whether this constraint mentions the given view on either side
    pub fn involves(&self, view: ViewId) -> bool {
        self.first.view == view || self.second.is_some_and(|s| s.view == view)
    }

    /// Whether this constraint relates exactly these two views (in either order)
    pub fn relates(&self, a: ViewId, b: ViewId) -> bool {
        match self.second {
            Some(second) => {
                (self.first.view == a && second.view == b)
                    || (self.first.view == b && second.view == a)
            }
            None => false,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:?} = ", self.first.view, self.first.anchor)?;
        match self.second {
            Some(second) if self.constant == 0.0 => {
                write!(f, "{}.{:?}", second.view, second.anchor)
            }
            Some(second) => write!(
                f,
                "{}.{:?} + {}",
                second.view, second.anchor, self.constant
            ),
            None => write!(f, "{}", self.constant),
        }
    }
}
