//! Pre-computed lookup table for hot-path throttle evaluation.

use serde::{Deserialize, Serialize};

use crate::curve::{ThrottleCurve, saturate, validate};

/// Pre-computed throttle table (no allocation, no transcendental calls).
///
/// Entry `i` holds the curve value at band position `i / (SIZE - 1)`.
/// Lookups interpolate linearly between entries; the boundaries keep the
/// exact semantics of [`ThrottleCurve::percent`].
///
/// # Hot-path safety
///
/// `ThrottleLut::lookup()`:
/// - No heap allocations
/// - O(1) time complexity
/// - Never fails; a NaN sample throttles fully
///
/// # Example
///
/// ```
/// use throttle_curve::ThrottleCurve;
///
/// let lut = ThrottleCurve::with_default_curve(50.0, 100.0)?.to_lut();
///
/// assert_eq!(lut.lookup(50.0), 0.0);
/// assert_eq!(lut.lookup(100.0), 1.0);
/// assert!((lut.lookup(75.0) - 0.8647).abs() < 1e-3);
/// # Ok::<(), throttle_curve::ThrottleError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ThrottleLut {
    warning_threshold: f64,
    emergency_threshold: f64,
    table: [f64; 256],
}

impl ThrottleLut {
    /// Number of table entries.
    pub const SIZE: usize = 256;

    /// Sample `curve` over its band.
    pub fn from_curve(curve: &ThrottleCurve) -> Self {
        let mut table = [0.0f64; Self::SIZE];
        let last = (Self::SIZE - 1) as f64;

        for (i, entry) in table.iter_mut().enumerate() {
            *entry = saturate(curve.curve(), i as f64 / last);
        }

        tracing::debug!(
            warning_threshold = curve.warning_threshold(),
            emergency_threshold = curve.emergency_threshold(),
            curve = curve.curve(),
            entries = Self::SIZE,
            "Built throttle lookup table"
        );

        Self {
            warning_threshold: curve.warning_threshold(),
            emergency_threshold: curve.emergency_threshold(),
            table,
        }
    }

    /// Throttle intensity for `current`, interpolated from the table.
    #[inline]
    pub fn lookup(&self, current: f64) -> f64 {
        if current.is_nan() || current >= self.emergency_threshold {
            return 1.0;
        }
        if current <= self.warning_threshold {
            return 0.0;
        }

        let position = (current - self.warning_threshold)
            / (self.emergency_threshold - self.warning_threshold);
        let scaled = position * (Self::SIZE - 1) as f64;
        let index_low = (scaled as usize).min(Self::SIZE - 2);
        let fraction = scaled - index_low as f64;

        match (self.table.get(index_low), self.table.get(index_low + 1)) {
            (Some(&low), Some(&high)) => low + fraction * (high - low),
            _ => 1.0,
        }
    }

    /// Level at or below which the table returns `0`.
    pub fn warning_threshold(&self) -> f64 {
        self.warning_threshold
    }

    /// Level at or above which the table returns `1`.
    pub fn emergency_threshold(&self) -> f64 {
        self.emergency_threshold
    }

    /// Raw table, indexed by band position.
    pub fn table(&self) -> &[f64; 256] {
        &self.table
    }

    /// Whether no entry is smaller than its predecessor.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|pair| match pair {
            [low, high] => high >= low,
            _ => true,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct LutRepr {
    warning_threshold: f64,
    emergency_threshold: f64,
    table: Vec<f64>,
}

impl Serialize for ThrottleLut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        LutRepr {
            warning_threshold: self.warning_threshold,
            emergency_threshold: self.emergency_threshold,
            table: self.table.to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ThrottleLut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = LutRepr::deserialize(deserializer)?;

        // Only the band is checked here; the shape is implied by the table.
        validate(repr.warning_threshold, repr.emergency_threshold, 1.0)
            .map_err(<D::Error as serde::de::Error>::custom)?;

        let table: [f64; 256] = repr.table.try_into().map_err(|vec: Vec<f64>| {
            <D::Error as serde::de::Error>::custom(format!(
                "Expected {} entries in ThrottleLut, got {}",
                Self::SIZE,
                vec.len()
            ))
        })?;

        if let Some(bad) = table.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(serde::de::Error::custom(format!(
                "ThrottleLut entry {} is outside [0, 1]",
                bad
            )));
        }

        if table.first().is_some_and(|&first| first > 0.0) {
            return Err(serde::de::Error::custom(
                "ThrottleLut table must start at 0 at the warning threshold",
            ));
        }

        let lut = Self {
            warning_threshold: repr.warning_threshold,
            emergency_threshold: repr.emergency_threshold,
            table,
        };

        if !lut.is_monotonic() {
            return Err(serde::de::Error::custom(
                "ThrottleLut table must be non-decreasing",
            ));
        }

        Ok(lut)
    }
}
