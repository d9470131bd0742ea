//! Transparent primitives: views that exist only for layout
//!
//! Spacers and the stack views that hold a layout together must never
//! swallow taps meant for the views around or behind them. Both primitives
//! carry the [`pass_through`] hook, so a hit landing on the primitive itself
//! is reported as a miss while hits on real descendants pass unchanged.

use crate::toolkit::{ViewId, ViewSpec, ViewTree};

/// Hit-test hook: a hit on the view itself becomes "no target here"
pub fn pass_through(own: ViewId, standard: Option<ViewId>) -> Option<ViewId> {
    if standard == Some(own) {
        None
    } else {
        standard
    }
}

/// Empty leaf with no intrinsic content; callers constrain its width or height
pub fn create_transparent_leaf(tree: &ViewTree) -> ViewId {
    let id = tree.create_view(ViewSpec::new().with_hit_test_hook(pass_through));
    tracing::trace!(view = %id, "created transparent leaf");
    id
}

/// Empty stack view whose arranged subviews remain hittable
pub fn create_transparent_stack(tree: &ViewTree) -> ViewId {
    let id = tree.create_stack(ViewSpec::new().with_hit_test_hook(pass_through));
    tracing::trace!(view = %id, "created transparent stack");
    id
}
