// ============================================================================
// Numeric Errors
// Error types for rational arithmetic, decimal rounding and fraction text
// ============================================================================

use std::fmt;

/// Errors that can occur while constructing, combining, rounding or parsing
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Argument outside the representable bounds (i64::MIN, zero denominator,
    /// scale outside [-28, 28], approximation error outside (0, 1])
    OutOfRange,
    /// Result exceeded 64-bit (rational) or 96-bit (decimal) capacity
    Overflow,
    /// Attempted division, inversion or modulo by zero
    DivisionByZero,
    /// A lossless rescale would drop non-zero digits
    PrecisionLoss,
    /// Input text or format string is not valid
    InvalidFormat,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::OutOfRange => {
                write!(f, "argument out of range: value is not representable")
            },
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: rescale would drop significant digits"
            ),
            NumericError::InvalidFormat => write!(f, "invalid format: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::InvalidFormat.to_string(),
            "invalid format: could not parse value"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::OutOfRange);
    }

    #[test]
    fn test_error_is_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(NumericError::PrecisionLoss);
        assert!(boxed.to_string().starts_with("precision loss"));
    }
}
