//! Stack layouts: a declarative tree of rows, columns, spacing and insets
//! compiled eagerly into nested stack views.
//!
//! Every node is realized the moment it is constructed. A [`StackLayout`]
//! only holds the view it produced; composing it into a parent (or
//! installing it) moves it, so each node is consumed exactly once.

use crate::toolkit::{Axis, Constraint, Distribution, ViewId, ViewTree};

use super::alignment::Alignment;
use super::error::LayoutError;
use super::transparent::{create_transparent_leaf, create_transparent_stack};

/// A realized layout node
#[derive(Debug, PartialEq, Eq)]
pub struct StackLayout {
    view: ViewId,
}

impl StackLayout {
    fn new(view: ViewId) -> Self {
        Self { view }
    }

    /// The view this node was realized into
    pub fn view_id(&self) -> ViewId {
        self.view
    }
}

/// Factory for layout nodes on one view tree
///
/// ```rust
/// use stack_layout::{Alignment, Axis, LayoutBuilder, Size, ViewSpec, ViewTree};
///
/// let tree = ViewTree::new();
/// let window = tree.create_window(Size::new(320.0, 480.0));
/// let title = tree.create_view(ViewSpec::new().with_intrinsic_size(Size::new(100.0, 24.0)));
///
/// let layout = LayoutBuilder::new(&tree);
/// let root = layout
///     .inset(
///         16.0,
///         Axis::Horizontal,
///         layout.rows_aligned(
///             Alignment::LEFT,
///             [layout.spacing(32.0, Axis::Vertical).unwrap(), layout.view(title)],
///         ).unwrap(),
///     )
///     .unwrap();
/// root.install(&tree, window).unwrap();
/// tree.layout(window).unwrap();
///
/// assert_eq!(tree.absolute_frame(title).unwrap().y.round(), 32.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder<'t> {
    tree: &'t ViewTree,
}

impl<'t> LayoutBuilder<'t> {
    pub fn new(tree: &'t ViewTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &'t ViewTree {
        self.tree
    }

    /// Wrap an existing view as it is
    pub fn view(&self, view: ViewId) -> StackLayout {
        StackLayout::new(view)
    }

    /// Fixed spacing along one axis; the other dimension is left to the
    /// surrounding stack.
    pub fn spacing(&self, amount: f64, axis: Axis) -> Result<StackLayout, LayoutError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LayoutError::invalid_spacing(amount));
        }
        let view = create_transparent_leaf(self.tree);
        self.tree.set_name(view, "spacing")?;
        self.tree.set_translates_autoresizing_mask(view, false)?;
        let dimension = match axis {
            Axis::Horizontal => view.width(),
            Axis::Vertical => view.height(),
        };
        self.tree
            .activate(Constraint::equal_to_constant(dimension, amount))?;
        tracing::debug!(%view, amount, ?axis, "realized spacing");
        Ok(StackLayout::new(view))
    }

    /// Pad `child` by `amount` on both sides along `axis`
    pub fn inset(
        &self,
        amount: f64,
        axis: Axis,
        child: StackLayout,
    ) -> Result<StackLayout, LayoutError> {
        let before = self.spacing(amount, axis)?;
        let after = self.spacing(amount, axis)?;
        let inset = self.stack(axis, Alignment::Fill, [before, child, after])?;
        self.tree.set_name(inset.view, "inset")?;
        Ok(inset)
    }

    /// Children stacked top to bottom, centered horizontally
    pub fn rows(
        &self,
        children: impl IntoIterator<Item = StackLayout>,
    ) -> Result<StackLayout, LayoutError> {
        self.rows_aligned(Alignment::default(), children)
    }

    /// Children stacked top to bottom with the given horizontal alignment
    pub fn rows_aligned(
        &self,
        alignment: Alignment,
        children: impl IntoIterator<Item = StackLayout>,
    ) -> Result<StackLayout, LayoutError> {
        let rows = self.stack(Axis::Vertical, alignment, children)?;
        self.tree.set_name(rows.view, "rows")?;
        Ok(rows)
    }

    /// Children side by side, centered vertically
    pub fn cols(
        &self,
        children: impl IntoIterator<Item = StackLayout>,
    ) -> Result<StackLayout, LayoutError> {
        self.cols_aligned(Alignment::default(), children)
    }

    /// Children side by side with the given vertical alignment
    pub fn cols_aligned(
        &self,
        alignment: Alignment,
        children: impl IntoIterator<Item = StackLayout>,
    ) -> Result<StackLayout, LayoutError> {
        let cols = self.stack(Axis::Horizontal, alignment, children)?;
        self.tree.set_name(cols.view, "cols")?;
        Ok(cols)
    }

    fn stack(
        &self,
        axis: Axis,
        alignment: Alignment,
        children: impl IntoIterator<Item = StackLayout>,
    ) -> Result<StackLayout, LayoutError> {
        let children: Vec<ViewId> = children.into_iter().map(|child| child.view).collect();
        // A rejected child leaves every other child unattached
        self.tree.check_detached(&children)?;

        let stack = create_transparent_stack(self.tree);
        self.tree.set_stack_axis(stack, axis)?;
        self.tree
            .set_stack_alignment(stack, alignment.for_stack_view())?;
        self.tree.set_stack_distribution(stack, Distribution::Fill)?;
        self.tree.add_arranged_subviews(stack, &children)?;
        tracing::debug!(view = %stack, ?axis, ?alignment, "realized stack");
        Ok(StackLayout::new(stack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{StackAlignment, StackConfig, ToolkitError, ViewSpec};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_view_wraps_without_changes() {
        let tree = ViewTree::new();
        let label = tree.create_view(ViewSpec::new().named("label"));
        let layout = LayoutBuilder::new(&tree);

        let node = layout.view(label);

        assert_eq!(node.view_id(), label);
        assert!(tree.translates_autoresizing_mask(label).unwrap());
        assert!(tree.constraints().is_empty());
    }

    #[test]
    fn test_stack_configuration() {
        let tree = ViewTree::new();
        let layout = LayoutBuilder::new(&tree);

        let node = layout
            .stack(Axis::Vertical, Alignment::Trailing, Vec::new())
            .unwrap();

        assert_eq!(
            tree.stack_config(node.view_id()).unwrap(),
            Some(StackConfig {
                axis: Axis::Vertical,
                alignment: StackAlignment::Trailing,
                distribution: Distribution::Fill,
            })
        );
        assert!(tree.has_hit_test_hook(node.view_id()).unwrap());
    }

    #[test]
    fn test_spacing_rejects_negative_and_non_finite() {
        let tree = ViewTree::new();
        let layout = LayoutBuilder::new(&tree);

        for amount in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                layout.spacing(amount, Axis::Horizontal),
                Err(LayoutError::InvalidSpacing { .. })
            ));
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_zero_spacing_accepted() {
        let tree = ViewTree::new();
        let layout = LayoutBuilder::new(&tree);

        let node = layout.spacing(0.0, Axis::Vertical).unwrap();

        assert_eq!(
            tree.constraints(),
            vec![Constraint::equal_to_constant(node.view_id().height(), 0.0)]
        );
    }

    #[test]
    fn test_rows_and_cols_default_to_center() {
        let tree = ViewTree::new();
        let layout = LayoutBuilder::new(&tree);

        let rows = layout.rows(Vec::new()).unwrap();
        let cols = layout.cols(Vec::new()).unwrap();

        let rows_config = tree.stack_config(rows.view_id()).unwrap().unwrap();
        let cols_config = tree.stack_config(cols.view_id()).unwrap().unwrap();
        assert_eq!(rows_config.axis, Axis::Vertical);
        assert_eq!(rows_config.alignment, StackAlignment::Center);
        assert_eq!(cols_config.axis, Axis::Horizontal);
        assert_eq!(cols_config.alignment, StackAlignment::Center);
    }

    #[test]
    fn test_failed_stack_leaves_children_detached() {
        let tree = ViewTree::new();
        let owner = tree.create_view(ViewSpec::new());
        let free = tree.create_view(ViewSpec::new());
        let taken = tree.create_view(ViewSpec::new());
        tree.add_subview(owner, taken).unwrap();
        let views_before = tree.len();
        let layout = LayoutBuilder::new(&tree);

        let err = layout
            .cols([layout.view(free), layout.view(taken)])
            .unwrap_err();

        assert!(matches!(
            err,
            LayoutError::Toolkit(ToolkitError::AlreadyHasParent { child, .. }) if child == taken
        ));
        assert_eq!(tree.parent(free).unwrap(), None);
        assert_eq!(tree.len(), views_before);

        let cols = layout.cols([layout.view(free)]).unwrap();
        assert_eq!(tree.parent(free).unwrap(), Some(cols.view_id()));
    }

    #[test]
    fn test_same_view_twice_in_one_stack_fails() {
        let tree = ViewTree::new();
        let label = tree.create_view(ViewSpec::new());
        let layout = LayoutBuilder::new(&tree);

        let err = layout
            .rows([layout.view(label), layout.view(label)])
            .unwrap_err();

        assert!(matches!(
            err,
            LayoutError::Toolkit(ToolkitError::DuplicateChild(view)) if view == label
        ));
        assert_eq!(tree.parent(label).unwrap(), None);
        assert!(tree.constraints().is_empty());
    }

    #[test]
    fn test_nesting_a_view_twice_fails() {
        let tree = ViewTree::new();
        let label = tree.create_view(ViewSpec::new());
        let layout = LayoutBuilder::new(&tree);

        layout.rows([layout.view(label)]).unwrap();
        let err = layout.cols([layout.view(label)]).unwrap_err();

        assert!(matches!(
            err,
            LayoutError::Toolkit(ToolkitError::AlreadyHasParent { .. })
        ));
    }
}
