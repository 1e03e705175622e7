//! Fuzzes deserialization of throttle curves and lookup tables from JSON.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_throttle_config

#![deny(static_mut_refs)]
#![no_main]

use libfuzzer_sys::fuzz_target;
use throttle_curve::{MAX_CURVE, ThrottleCurve, ThrottleLut};

fuzz_target!(|data: &[u8]| {
    // Anything that deserializes must already satisfy the curve invariants.
    if let Ok(curve) = serde_json::from_slice::<ThrottleCurve>(data) {
        assert!(curve.emergency_threshold() > curve.warning_threshold());
        assert!(curve.curve() > 0.0 && curve.curve() <= MAX_CURVE);
    }

    if let Ok(lut) = serde_json::from_slice::<ThrottleLut>(data) {
        assert!(lut.table().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(lut.table()[0] <= 0.0);
        assert!(lut.is_monotonic());
    }
});
