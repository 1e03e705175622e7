//! Error types for throttle curve operations.

/// Error type for throttle curve operations.
///
/// Threshold and curve errors are caller configuration bugs: they are
/// reported as soon as a curve is built and never clamped into something
/// that would silently gate admission with a meaningless number.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ThrottleError {
    /// The emergency threshold does not lie strictly above the warning
    /// threshold, or one of them is not finite.
    #[error(
        "Invalid throttle thresholds: emergency {emergency} must be finite and strictly greater than warning {warning}"
    )]
    InvalidThresholds {
        /// The warning threshold that was supplied.
        warning: f64,
        /// The emergency threshold that was supplied.
        emergency: f64,
    },

    /// The curve shape parameter is not positive, not finite, or steeper
    /// than [`MAX_CURVE`](crate::curve::MAX_CURVE).
    #[error(
        "Invalid throttle curve: must be > 0 and <= {max}, got {0}",
        max = crate::curve::MAX_CURVE
    )]
    InvalidCurve(f64),

    /// A sampled value cannot be placed on the curve.
    #[error("Invalid {field} value: {value}")]
    InvalidInput {
        /// Name of the rejected input.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl ThrottleError {
    /// Whether this error comes from the curve configuration rather than
    /// from a single sample.
    pub fn is_configuration(&self) -> bool {
        match self {
            ThrottleError::InvalidThresholds { .. } | ThrottleError::InvalidCurve(_) => true,
            ThrottleError::InvalidInput { .. } => false,
        }
    }
}
