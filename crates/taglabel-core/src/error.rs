//! Error types for taglabel.
//!
//! Only precondition violations are errors. Outcomes such as "no truncation
//! needed" or a hit-test miss are ordinary return values of the operations
//! that produce them.

use thiserror::Error;

/// Errors raised when a label is asked to do work it is not set up for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelError {
    /// The container width is zero, negative or not a finite number.
    #[error("invalid container width: {width}")]
    InvalidWidth {
        /// The rejected width.
        width: f32,
    },

    /// A hit test was requested before the label produced any displayed text.
    #[error("label has not been rendered yet")]
    NotRendered,
}

/// Result type for label operations.
pub type LabelResult<T> = Result<T, LabelError>;

/// Validate a container width, returning it unchanged when usable.
pub fn check_width(width: f32) -> LabelResult<f32> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(LabelError::InvalidWidth { width })
    }
}
