//! Serializable throttle curve settings.

use serde::{Deserialize, Serialize};

use crate::curve::{DEFAULT_CURVE, ThrottleCurve, validate};
use crate::error::ThrottleError;

fn default_curve() -> f64 {
    DEFAULT_CURVE
}

/// Throttle curve settings as they appear in a caller's configuration.
///
/// `curve` may be omitted and defaults to [`DEFAULT_CURVE`]. Unknown fields
/// are rejected so that a misspelled threshold does not go unnoticed.
///
/// # Example
///
/// ```
/// use throttle_curve::{ThrottleConfig, ThrottleCurve};
///
/// let config: ThrottleConfig = serde_json::from_str(
///     r#"{ "warning_threshold": 0.7, "emergency_threshold": 0.95 }"#,
/// )
/// .map_err(|e| e.to_string())?;
///
/// let curve = ThrottleCurve::try_from(config).map_err(|e| e.to_string())?;
/// assert_eq!(curve.curve(), 4.0);
/// # Ok::<(), String>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// Level at or below which no throttling applies.
    pub warning_threshold: f64,
    /// Level at or above which throttling is maximal.
    pub emergency_threshold: f64,
    /// Shape of the rise between the two thresholds.
    #[serde(default = "default_curve")]
    pub curve: f64,
}

impl ThrottleConfig {
    /// Settings for the given band with the default curve.
    pub fn new(warning_threshold: f64, emergency_threshold: f64) -> Self {
        Self {
            warning_threshold,
            emergency_threshold,
            curve: DEFAULT_CURVE,
        }
    }

    /// Override the curve shape.
    pub fn with_curve(mut self, curve: f64) -> Self {
        self.curve = curve;
        self
    }

    /// Check the settings without building a curve.
    ///
    /// # Errors
    ///
    /// * [`ThrottleError::InvalidThresholds`] if the band is empty, inverted
    ///   or not finite
    /// * [`ThrottleError::InvalidCurve`] if the curve is outside
    ///   `(0, MAX_CURVE]`
    pub fn validate(&self) -> Result<(), ThrottleError> {
        validate(self.warning_threshold, self.emergency_threshold, self.curve)
    }
}

impl From<ThrottleCurve> for ThrottleConfig {
    fn from(curve: ThrottleCurve) -> Self {
        Self {
            warning_threshold: curve.warning_threshold(),
            emergency_threshold: curve.emergency_threshold(),
            curve: curve.curve(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_config_new_uses_default_curve() {
        let config = ThrottleConfig::new(50.0, 100.0);
        assert!((config.curve - DEFAULT_CURVE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_with_curve() {
        let config = ThrottleConfig::new(50.0, 100.0).with_curve(8.0);
        assert!((config.curve - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_validate() {
        assert!(ThrottleConfig::new(50.0, 100.0).validate().is_ok());
        assert!(matches!(
            ThrottleConfig::new(100.0, 100.0).validate(),
            Err(ThrottleError::InvalidThresholds { .. })
        ));
        assert!(matches!(
            ThrottleConfig::new(50.0, 100.0).with_curve(0.0).validate(),
            Err(ThrottleError::InvalidCurve(_))
        ));
        assert!(matches!(
            ThrottleConfig::new(50.0, 100.0).with_curve(40.0).validate(),
            Err(ThrottleError::InvalidCurve(_))
        ));
    }

    #[test]
    fn test_config_deserialize_default_curve() {
        let json = r#"{"warning_threshold": 50.0, "emergency_threshold": 100.0}"#;
        let config: ThrottleConfig = must(serde_json::from_str(json));
        assert_eq!(config, ThrottleConfig::new(50.0, 100.0));
    }

    #[test]
    fn test_config_deserialize_rejects_unknown_fields() {
        let json = r#"{"warning_threshold": 50.0, "emergency_threshold": 100.0, "curv": 2.0}"#;
        let result: Result<ThrottleConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_deserialize_requires_thresholds() {
        let json = r#"{"warning_threshold": 50.0}"#;
        let result: Result<ThrottleConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ThrottleConfig::new(0.6, 0.9).with_curve(2.5);
        let json = must(serde_json::to_string(&config));
        let decoded: ThrottleConfig = must(serde_json::from_str(&json));
        assert_eq!(config, decoded);
    }

    #[test]
    fn test_curve_serializes_as_config() {
        let curve = must(ThrottleCurve::new(50.0, 100.0, 8.0));
        let value = must(serde_json::to_value(curve));
        assert_eq!(
            value,
            serde_json::json!({
                "warning_threshold": 50.0,
                "emergency_threshold": 100.0,
                "curve": 8.0,
            })
        );

        let decoded: ThrottleCurve = must(serde_json::from_value(value));
        assert_eq!(decoded, curve);
    }

    #[test]
    fn test_curve_deserialize_rejects_invalid() {
        let json = r#"{"warning_threshold": 100.0, "emergency_threshold": 50.0}"#;
        let result: Result<ThrottleCurve, _> = serde_json::from_str(json);
        let err = match result {
            Ok(curve) => panic!("invalid curve accepted: {:?}", curve),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Invalid throttle thresholds"));

        let json = r#"{"warning_threshold": 50.0, "emergency_threshold": 100.0, "curve": -1.0}"#;
        let result: Result<ThrottleCurve, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
