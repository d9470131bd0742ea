//! Error types for the layout builder

use thiserror::Error;

use crate::toolkit::ToolkitError;

/// Errors that can occur while building or installing a layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Spacing must be a finite, non-negative amount
    #[error("invalid spacing {amount}: must be finite and non-negative")]
    InvalidSpacing { amount: f64 },

    /// The toolkit refused an operation
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

impl LayoutError {
    pub fn invalid_spacing(amount: f64) -> Self {
        Self::InvalidSpacing { amount }
    }
}
