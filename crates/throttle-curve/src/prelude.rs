//! Convenience re-exports.
//!
//! ```
//! use throttle_curve::prelude::*;
//!
//! let curve = ThrottleCurve::with_default_curve(50.0, 100.0)?;
//! assert!(curve.percent(75.0)? > 0.0);
//! # Ok::<(), ThrottleError>(())
//! ```

pub use crate::config::ThrottleConfig;
pub use crate::curve::{DEFAULT_CURVE, MAX_CURVE, ThrottleCurve};
pub use crate::error::ThrottleError;
pub use crate::lut::ThrottleLut;
pub use crate::{calculate_throttle_percent, calculate_throttle_percent_with_curve};
