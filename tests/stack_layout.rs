//! Integration tests for realizing layout trees: spacing, stack order and insets.

use pretty_assertions::assert_eq;
use stack_layout::layout::LayoutError;
use stack_layout::toolkit::{Anchor, StackAlignment, StackConfig, ViewKind};
use stack_layout::{
    Alignment, Axis, Edge, Edges, InstallOptions, LayoutBuilder, Size, ViewId, ViewSpec, ViewTree,
};

const TOLERANCE: f64 = 0.01;

fn labels(tree: &ViewTree, count: usize) -> Vec<ViewId> {
    (0..count)
        .map(|i| {
            tree.create_view(
                ViewSpec::new()
                    .named(format!("label {}", i))
                    .with_intrinsic_size(Size::new(40.0 + i as f64 * 10.0, 20.0)),
            )
        })
        .collect()
}

#[test]
fn test_spacing_fixes_exactly_one_dimension() {
    for axis in [Axis::Horizontal, Axis::Vertical] {
        for amount in [0.5, 8.0, 16.0, 64.0, 1000.0] {
            let tree = ViewTree::new();
            let spacer = LayoutBuilder::new(&tree).spacing(amount, axis).unwrap();
            let view = spacer.view_id();

            let constraints = tree.constraints_involving(view);
            assert_eq!(constraints.len(), 1, "axis {:?}, amount {}", axis, amount);
            let constraint = constraints[0];
            assert_eq!(constraint.first.view, view);
            assert_eq!(constraint.first.anchor, Anchor::dimension(axis));
            assert_eq!(constraint.second, None);
            assert_eq!(constraint.constant, amount);
            assert!(constraints
                .iter()
                .all(|c| c.first.anchor != Anchor::dimension(axis.cross())));
        }
    }
}

#[test]
fn test_spacing_rejects_invalid_amounts() {
    let tree = ViewTree::new();
    let layout = LayoutBuilder::new(&tree);

    for amount in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = layout.spacing(amount, Axis::Vertical);
        assert!(matches!(result, Err(LayoutError::InvalidSpacing { .. })));
    }
    assert!(tree.is_empty());
}

#[test]
fn test_rows_and_cols_preserve_order() {
    for count in [0, 1, 2, 5] {
        let tree = ViewTree::new();
        let views = labels(&tree, count);
        let layout = LayoutBuilder::new(&tree);

        let rows = layout
            .rows(views.iter().map(|&v| layout.view(v)))
            .unwrap();
        assert_eq!(tree.arranged_subviews(rows.view_id()).unwrap(), views);
        assert_eq!(tree.subviews(rows.view_id()).unwrap(), views);
    }

    let tree = ViewTree::new();
    let views = labels(&tree, 3);
    let layout = LayoutBuilder::new(&tree);
    let cols = layout
        .cols_aligned(Alignment::BOTTOM, views.iter().map(|&v| layout.view(v)))
        .unwrap();
    assert_eq!(tree.arranged_subviews(cols.view_id()).unwrap(), views);
    assert_eq!(
        tree.kind(cols.view_id()).unwrap(),
        ViewKind::Stack(StackConfig {
            axis: Axis::Horizontal,
            alignment: StackAlignment::Trailing,
            distribution: Default::default(),
        })
    );
}

#[test]
fn test_inset_wraps_child_between_two_spacers() {
    let tree = ViewTree::new();
    let label = labels(&tree, 1)[0];
    let layout = LayoutBuilder::new(&tree);

    let inset = layout
        .inset(12.0, Axis::Vertical, layout.view(label))
        .unwrap();
    let arranged = tree.arranged_subviews(inset.view_id()).unwrap();

    assert_eq!(arranged.len(), 3);
    assert_eq!(arranged[1], label);
    for spacer in [arranged[0], arranged[2]] {
        let constraints = tree.constraints_involving(spacer);
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].first.anchor, Anchor::Height);
        assert_eq!(constraints[0].constant, 12.0);
        assert!(tree.has_hit_test_hook(spacer).unwrap());
    }
    assert_ne!(arranged[0], arranged[2]);
    assert_eq!(
        tree.stack_config(inset.view_id()).unwrap().map(|c| (c.axis, c.alignment)),
        Some((Axis::Vertical, StackAlignment::Fill))
    );
}

#[test]
fn test_cols_lay_children_out_side_by_side() {
    let tree = ViewTree::new();
    let window = tree.create_window(Size::new(300.0, 100.0));
    let views = labels(&tree, 3);
    let layout = LayoutBuilder::new(&tree);

    layout
        .cols_aligned(Alignment::TOP, views.iter().map(|&v| layout.view(v)))
        .unwrap()
        .install_with(
            &tree,
            window,
            InstallOptions::new().with_edges(Edges::NONE.with(Edge::Top).with(Edge::Left)),
        )
        .unwrap();
    tree.layout(window).unwrap();

    let mut x = 0.0;
    for (i, &view) in views.iter().enumerate() {
        let frame = tree.frame(view).unwrap();
        assert!((frame.x - x).abs() < TOLERANCE, "child {} at {:?}", i, frame);
        assert!(frame.y.abs() < TOLERANCE);
        x += 40.0 + i as f64 * 10.0;
    }
}

#[test]
fn test_center_alignment_centers_across_axis() {
    let tree = ViewTree::new();
    let window = tree.create_window(Size::new(200.0, 100.0));
    let views = labels(&tree, 2);
    let layout = LayoutBuilder::new(&tree);

    layout
        .rows(views.iter().map(|&v| layout.view(v)))
        .unwrap()
        .install(&tree, window)
        .unwrap();
    tree.layout(window).unwrap();

    let first = tree.frame(views[0]).unwrap();
    let second = tree.frame(views[1]).unwrap();
    assert!((first.center().x - 100.0).abs() < TOLERANCE);
    assert!((second.center().x - 100.0).abs() < TOLERANCE);
    assert!((second.y - first.bottom()).abs() < TOLERANCE);
}

#[test]
fn test_failed_cols_can_be_retried() {
    let tree = ViewTree::new();
    let owner = tree.create_view(ViewSpec::new().named("owner"));
    let views = labels(&tree, 2);
    let (first, taken) = (views[0], views[1]);
    tree.add_subview(owner, taken).unwrap();
    let layout = LayoutBuilder::new(&tree);

    let failed = layout.cols([layout.view(first), layout.view(taken)]);
    assert!(failed.is_err());
    assert_eq!(tree.parent(first).unwrap(), None);

    let rows = layout.rows([layout.view(first)]).unwrap();
    assert_eq!(tree.parent(first).unwrap(), Some(rows.view_id()));
    assert_eq!(tree.arranged_subviews(rows.view_id()).unwrap(), vec![first]);
}
