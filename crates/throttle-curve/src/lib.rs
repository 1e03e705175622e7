//! Exponential throttle curve for backpressure and admission control
//!
//! This crate converts a measured resource level into a throttle intensity
//! in `[0, 1]`, given a warning threshold, an emergency threshold and a
//! curve shape.
//!
//! # Overview
//!
//! - **At or below warning**: `0` (no throttling)
//! - **At or above emergency**: `1` (full throttling)
//! - **In between**: `1 - e^(-curve * position)`, where `position` is the
//!   normalized place of the level inside the band
//!
//! The calculation is pure: no I/O, no state, safe to call from any number
//! of threads. Misconfigured bands and curves are rejected with a
//! [`ThrottleError`] rather than clamped.
//!
//! # Evaluation paths
//!
//! ## Direct: [`calculate_throttle_percent`], [`ThrottleCurve::percent()`]
//! Validates (once, for `ThrottleCurve`) and evaluates one `exp_m1` per call.
//!
//! ## Table: [`ThrottleLut::lookup()`]
//! O(1) interpolation over 256 pre-computed entries, infallible, for
//! admission loops that evaluate the curve on every request.
//!
//! # Example
//!
//! ```
//! use throttle_curve::{ThrottleCurve, calculate_throttle_percent};
//!
//! // One-off evaluation with the default curve
//! let percent = calculate_throttle_percent(75.0, 50.0, 100.0)?;
//! assert!((percent - 0.865).abs() < 1e-3);
//!
//! // Validate once, evaluate many times
//! let curve = ThrottleCurve::new(0.70, 0.95, 8.0)?;
//! let lut = curve.to_lut();
//! let shed = lut.lookup(0.80);
//! assert!(shed > 0.0 && shed < 1.0);
//! # Ok::<(), throttle_curve::ThrottleError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod curve;
pub mod error;
pub mod lut;
pub mod prelude;

pub use config::ThrottleConfig;
pub use curve::{DEFAULT_CURVE, MAX_CURVE, ThrottleCurve};
pub use error::ThrottleError;
pub use lut::ThrottleLut;

/// Throttle intensity for `current` with [`DEFAULT_CURVE`].
///
/// # Errors
///
/// See [`calculate_throttle_percent_with_curve`].
pub fn calculate_throttle_percent(
    current: f64,
    warning_threshold: f64,
    emergency_threshold: f64,
) -> Result<f64, ThrottleError> {
    calculate_throttle_percent_with_curve(
        current,
        warning_threshold,
        emergency_threshold,
        DEFAULT_CURVE,
    )
}

/// Throttle intensity for `current` with an explicit curve shape.
///
/// # Errors
///
/// * [`ThrottleError::InvalidThresholds`] if `emergency_threshold` is not
///   strictly above `warning_threshold` or either is not finite
/// * [`ThrottleError::InvalidCurve`] if `curve` is not in `(0, MAX_CURVE]`
/// * [`ThrottleError::InvalidInput`] if `current` is NaN
///
/// Nothing is logged; callers evaluating a fixed configuration repeatedly
/// should build a [`ThrottleCurve`] once, which reports rejections.
pub fn calculate_throttle_percent_with_curve(
    current: f64,
    warning_threshold: f64,
    emergency_threshold: f64,
    curve: f64,
) -> Result<f64, ThrottleError> {
    ThrottleCurve::checked(warning_threshold, emergency_threshold, curve)?.percent(current)
}
