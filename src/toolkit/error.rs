//! Error types for the view toolkit

use thiserror::Error;

use super::solver::SolverError;
use super::view::ViewId;

/// Errors raised by view tree operations and the layout pass
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The id does not belong to this tree
    #[error("unknown view {0}")]
    UnknownView(ViewId),

    /// Stack configuration on a plain view
    #[error("view {0} is not a stack view")]
    NotAStack(ViewId),

    /// A view can only be attached to one parent
    #[error("view {child} already has parent {parent}")]
    AlreadyHasParent { child: ViewId, parent: ViewId },

    /// The same view listed twice among new children
    #[error("view {0} is listed more than once")]
    DuplicateChild(ViewId),

    /// Attaching would make a view its own ancestor
    #[error("adding {child} to {parent} would create a cycle")]
    WouldCreateCycle { parent: ViewId, child: ViewId },

    /// Constraint solving failed during layout
    #[error("layout failed: {0}")]
    Solver(#[from] SolverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_has_parent_display() {
        let err = ToolkitError::AlreadyHasParent {
            child: ViewId(4),
            parent: ViewId(1),
        };
        assert_eq!(err.to_string(), "view #4 already has parent #1");
    }

    #[test]
    fn test_solver_error_wraps() {
        let err = ToolkitError::from(SolverError::Internal("boom".to_string()));
        assert!(err.to_string().contains("layout failed"));
        assert!(err.to_string().contains("boom"));
    }
}
