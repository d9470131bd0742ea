//! Attaching a realized layout to a destination view

use crate::toolkit::{AnchorRef, Constraint, ConstraintId, EdgeInsets, ViewId, ViewTree};

use super::error::LayoutError;
use super::stack_layout::StackLayout;

/// One edge of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Left,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Right, Edge::Bottom];

    fn anchor(self, view: ViewId) -> AnchorRef {
        match self {
            Edge::Top => view.top(),
            Edge::Left => view.left(),
            Edge::Right => view.right(),
            Edge::Bottom => view.bottom(),
        }
    }

    /// Offset from the destination's edge, pointing inwards
    fn offset(self, insets: &EdgeInsets) -> f64 {
        match self {
            Edge::Top => insets.top,
            Edge::Left => insets.left,
            Edge::Right => -insets.right,
            Edge::Bottom => -insets.bottom,
        }
    }
}

/// A set of edges to pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    top: bool,
    left: bool,
    right: bool,
    bottom: bool,
}

impl Edges {
    pub const ALL: Edges = Edges {
        top: true,
        left: true,
        right: true,
        bottom: true,
    };

    pub const NONE: Edges = Edges {
        top: false,
        left: false,
        right: false,
        bottom: false,
    };

    pub fn with(mut self, edge: Edge) -> Self {
        *self.flag_mut(edge) = true;
        self
    }

    pub fn without(mut self, edge: Edge) -> Self {
        *self.flag_mut(edge) = false;
        self
    }

    pub fn contains(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.top,
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    fn flag_mut(&mut self, edge: Edge) -> &mut bool {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// Contained edges in top, left, right, bottom order
    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::ALL.into_iter().filter(|edge| self.contains(*edge))
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::ALL
    }
}

/// How a layout is attached to its destination
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstallOptions {
    /// Distance from each destination edge
    pub insets: EdgeInsets,
    /// Which edges get pinned; all four by default
    pub edges: Edges,
}

impl InstallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_insets(mut self, insets: EdgeInsets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_edges(mut self, edges: Edges) -> Self {
        self.edges = edges;
        self
    }
}

/// Result of installing a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub view: ViewId,
    pub destination: ViewId,
    /// One constraint per pinned edge, in top, left, right, bottom order
    pub constraints: Vec<ConstraintId>,
}

impl StackLayout {
    /// Attach this layout's view to `destination`, pinned to all four edges
    pub fn install(self, tree: &ViewTree, destination: ViewId) -> Result<Installed, LayoutError> {
        self.install_with(tree, destination, InstallOptions::default())
    }

    /// Attach this layout's view to `destination` with the given insets and edges
    pub fn install_with(
        self,
        tree: &ViewTree,
        destination: ViewId,
        options: InstallOptions,
    ) -> Result<Installed, LayoutError> {
        let view = self.view_id();
        tree.add_subview(destination, view)?;
        tree.set_translates_autoresizing_mask(view, false)?;

        let constraints = options
            .edges
            .iter()
            .map(|edge| {
                let constraint =
                    Constraint::equal(edge.anchor(view), edge.anchor(destination))
                        .offset(edge.offset(&options.insets));
                tree.activate(constraint)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            %view,
            %destination,
            edges = constraints.len(),
            "installed layout"
        );
        Ok(Installed {
            view,
            destination,
            constraints,
        })
    }
}
