//! Exponential saturation curve between a warning and an emergency threshold.

use serde::{Deserialize, Serialize};

use crate::config::ThrottleConfig;
use crate::error::ThrottleError;
use crate::lut::ThrottleLut;

/// Curve shape used when the caller does not pick one.
pub const DEFAULT_CURVE: f64 = 4.0;

/// Steepest accepted curve shape.
///
/// Above roughly `37`, `1 - e^(-curve * position)` rounds to exactly `1.0`
/// in `f64` for levels still inside the band, which would make them
/// indistinguishable from the emergency case.
pub const MAX_CURVE: f64 = 36.0;

/// Smallest in-band result; keeps levels just above the warning line from
/// underflowing to the exact `0` reserved for the warning case.
const MIN_IN_BAND: f64 = f64::MIN_POSITIVE * f64::EPSILON;

/// Validated throttle curve.
///
/// Maps a resource level onto a throttle intensity in `[0, 1]`:
///
/// - at or below `warning_threshold` the result is exactly `0`
/// - at or above `emergency_threshold` the result is exactly `1`
/// - in between, `1 - e^(-curve * position)` where `position` is the
///   normalized place of the level inside the band
///
/// Larger `curve` values compress the rise into the lower part of the band;
/// smaller values approach a linear response.
///
/// # Example
///
/// ```
/// use throttle_curve::ThrottleCurve;
///
/// let curve = ThrottleCurve::with_default_curve(50.0, 100.0)?;
///
/// assert_eq!(curve.percent(40.0)?, 0.0);
/// assert_eq!(curve.percent(100.0)?, 1.0);
///
/// // Halfway through the band: 1 - e^-2
/// let midpoint = curve.percent(75.0)?;
/// assert!((midpoint - 0.8647).abs() < 1e-4);
/// # Ok::<(), throttle_curve::ThrottleError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThrottleConfig", into = "ThrottleConfig")]
pub struct ThrottleCurve {
    warning_threshold: f64,
    emergency_threshold: f64,
    curve: f64,
}

impl ThrottleCurve {
    /// Create a curve from its two thresholds and its shape.
    ///
    /// # Errors
    ///
    /// * [`ThrottleError::InvalidThresholds`] if either threshold is not
    ///   finite, `emergency_threshold <= warning_threshold`, or the band is
    ///   too wide to be represented
    /// * [`ThrottleError::InvalidCurve`] if `curve` is not finite, `<= 0`
    ///   or above [`MAX_CURVE`]
    ///
    /// A rejected configuration is logged at `WARN`.
    pub fn new(
        warning_threshold: f64,
        emergency_threshold: f64,
        curve: f64,
    ) -> Result<Self, ThrottleError> {
        Self::checked(warning_threshold, emergency_threshold, curve).inspect_err(|err| {
            tracing::warn!(
                warning_threshold,
                emergency_threshold,
                curve,
                error = %err,
                "Rejected throttle curve configuration"
            );
        })
    }

    /// Validate without logging; used on per-sample paths.
    pub(crate) fn checked(
        warning_threshold: f64,
        emergency_threshold: f64,
        curve: f64,
    ) -> Result<Self, ThrottleError> {
        validate(warning_threshold, emergency_threshold, curve)?;
        Ok(Self {
            warning_threshold,
            emergency_threshold,
            curve,
        })
    }

    /// Create a curve with [`DEFAULT_CURVE`] as its shape.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::InvalidThresholds`] under the same conditions as
    /// [`ThrottleCurve::new`].
    pub fn with_default_curve(
        warning_threshold: f64,
        emergency_threshold: f64,
    ) -> Result<Self, ThrottleError> {
        Self::new(warning_threshold, emergency_threshold, DEFAULT_CURVE)
    }

    /// Same band, different shape.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::InvalidCurve`] if `curve` is not finite, `<= 0` or
    /// above [`MAX_CURVE`].
    pub fn with_curve(self, curve: f64) -> Result<Self, ThrottleError> {
        Self::new(self.warning_threshold, self.emergency_threshold, curve)
    }

    /// Level at or below which no throttling applies.
    pub fn warning_threshold(&self) -> f64 {
        self.warning_threshold
    }

    /// Level at or above which throttling is maximal.
    pub fn emergency_threshold(&self) -> f64 {
        self.emergency_threshold
    }

    /// Shape parameter.
    pub fn curve(&self) -> f64 {
        self.curve
    }

    /// Normalized position of `current` inside the band, clamped to `[0, 1]`.
    ///
    /// NaN maps to `1`.
    pub fn position(&self, current: f64) -> f64 {
        if current.is_nan() {
            return 1.0;
        }
        ((current - self.warning_threshold) / self.span()).clamp(0.0, 1.0)
    }

    /// Throttle intensity for `current`.
    ///
    /// Infinite levels are accepted and land on the boundaries. Levels
    /// strictly inside the band always return a value strictly inside
    /// `(0, 1)`: [`MAX_CURVE`] bounds the top, and results that would
    /// underflow are raised to the smallest positive `f64`.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::InvalidInput`] if `current` is NaN.
    pub fn percent(&self, current: f64) -> Result<f64, ThrottleError> {
        if current.is_nan() {
            return Err(ThrottleError::InvalidInput {
                field: "current",
                value: current,
            });
        }
        if current <= self.warning_threshold {
            return Ok(0.0);
        }
        if current >= self.emergency_threshold {
            return Ok(1.0);
        }

        let position = (current - self.warning_threshold) / self.span();
        Ok(saturate(self.curve, position).max(MIN_IN_BAND))
    }

    /// Value the curve approaches just below the emergency threshold.
    pub fn saturation_limit(&self) -> f64 {
        saturate(self.curve, 1.0)
    }

    /// Pre-compute a lookup table for this curve.
    pub fn to_lut(&self) -> ThrottleLut {
        ThrottleLut::from_curve(self)
    }

    pub(crate) fn span(&self) -> f64 {
        self.emergency_threshold - self.warning_threshold
    }
}

impl TryFrom<ThrottleConfig> for ThrottleCurve {
    type Error = ThrottleError;

    fn try_from(config: ThrottleConfig) -> Result<Self, Self::Error> {
        Self::new(
            config.warning_threshold,
            config.emergency_threshold,
            config.curve,
        )
    }
}

/// `1 - e^(-curve * position)`.
///
/// `expm1` keeps the result strictly positive for positions just above zero,
/// where `1.0 - exp(..)` would round to `0`.
#[inline]
pub(crate) fn saturate(curve: f64, position: f64) -> f64 {
    -(-curve * position).exp_m1()
}

pub(crate) fn validate(
    warning_threshold: f64,
    emergency_threshold: f64,
    curve: f64,
) -> Result<(), ThrottleError> {
    let thresholds_valid = warning_threshold.is_finite()
        && emergency_threshold.is_finite()
        && emergency_threshold > warning_threshold
        && (emergency_threshold - warning_threshold).is_finite();
    if !thresholds_valid {
        return Err(ThrottleError::InvalidThresholds {
            warning: warning_threshold,
            emergency: emergency_threshold,
        });
    }
    if !curve.is_finite() || curve <= 0.0 || curve > MAX_CURVE {
        return Err(ThrottleError::InvalidCurve(curve));
    }
    Ok(())
}
