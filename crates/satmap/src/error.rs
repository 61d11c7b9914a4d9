//! Error types for raster algebra.

use thiserror::Error;

/// Result type alias using SatmapError.
pub type SatmapResult<T> = Result<T, SatmapError>;

/// Broad classification of a [`SatmapError`].
///
/// Every failure is a deterministic function of the inputs, so neither class
/// is worth retrying without changing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The value being constructed is malformed.
    Validation,
    /// The operands do not satisfy the operator's preconditions.
    Precondition,
}

/// Primary error type for raster construction and the raster operators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SatmapError {
    // === Validation Errors ===
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Shape mismatch: data is {actual:?} but shape is {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid footprint: {0}")]
    InvalidFootprint(String),

    // === Precondition Errors ===
    #[error("Resolution mismatch: {left} vs {right}; use mosaic to resample")]
    ResolutionMismatch { left: f64, right: f64 },

    #[error("Both rasters are the same capture ({instrument} on {date})")]
    SameCapture { instrument: String, date: String },

    #[error("Rasters do not overlap")]
    NoOverlap,

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("Invalid padding: {0}")]
    InvalidPaddingType(String),

    #[error("Ground coordinate ({x}, {y}) is outside x {xcoords:?}, y {ycoords:?}")]
    OutOfRange {
        x: f64,
        y: f64,
        xcoords: (f64, f64),
        ycoords: (f64, f64),
    },
}

impl SatmapError {
    /// Which class of failure this is.
    pub fn class(&self) -> ErrorClass {
        match self {
            SatmapError::TypeMismatch(_)
            | SatmapError::ShapeMismatch { .. }
            | SatmapError::InvalidFootprint(_) => ErrorClass::Validation,

            SatmapError::ResolutionMismatch { .. }
            | SatmapError::SameCapture { .. }
            | SatmapError::NoOverlap
            | SatmapError::InvalidResolution(_)
            | SatmapError::InvalidPaddingType(_)
            | SatmapError::OutOfRange { .. } => ErrorClass::Precondition,
        }
    }

    /// Stable short code for this error, suitable for scripts and exit messages.
    pub fn code(&self) -> &'static str {
        match self {
            SatmapError::TypeMismatch(_) => "TypeMismatch",
            SatmapError::ShapeMismatch { .. } => "ShapeMismatch",
            SatmapError::InvalidFootprint(_) => "InvalidFootprint",
            SatmapError::ResolutionMismatch { .. } => "ResolutionMismatch",
            SatmapError::SameCapture { .. } => "SameCapture",
            SatmapError::NoOverlap => "NoOverlap",
            SatmapError::InvalidResolution(_) => "InvalidResolution",
            SatmapError::InvalidPaddingType(_) => "InvalidPaddingType",
            SatmapError::OutOfRange { .. } => "OutOfRange",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(
            SatmapError::TypeMismatch("data".into()).class(),
            ErrorClass::Validation
        );
        assert_eq!(
            SatmapError::ShapeMismatch {
                expected: (2, 2),
                actual: (3, 3)
            }
            .class(),
            ErrorClass::Validation
        );
        assert_eq!(SatmapError::NoOverlap.class(), ErrorClass::Precondition);
        assert_eq!(
            SatmapError::ResolutionMismatch {
                left: 5.0,
                right: 15.0
            }
            .class(),
            ErrorClass::Precondition
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SatmapError::NoOverlap.code(), "NoOverlap");
        assert_eq!(
            SatmapError::InvalidResolution("0".into()).code(),
            "InvalidResolution"
        );
    }

    #[test]
    fn test_display_mentions_mosaic() {
        let err = SatmapError::ResolutionMismatch {
            left: 5.0,
            right: 15.0,
        };
        assert!(err.to_string().contains("mosaic"));
    }
}
