// ============================================================================
// Numeric Errors
// Error types shared by the decimal backend adapters
// ============================================================================

use std::fmt;

/// Errors that can occur inside a decimal backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the backend's maximum representable value
    Overflow,
    /// Result below the backend's minimum representable value
    Underflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Requested more fractional digits than the backend can carry
    ScaleExceeded,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::ScaleExceeded => write!(
                f,
                "scale exceeded: backend cannot carry the requested fractional digits"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for backend operations
pub type NumericResult<T> = Result<T, NumericError>;
