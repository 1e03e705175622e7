//! Fuzzes throttle evaluation with arbitrary levels, bands and curve shapes.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_throttle_percent

#![deny(static_mut_refs)]
#![no_main]

use libfuzzer_sys::fuzz_target;
use throttle_curve::{ThrottleCurve, calculate_throttle_percent_with_curve};

fn read_f64(data: &[u8], index: usize) -> f64 {
    let start = index * 8;
    let mut bytes = [0u8; 8];
    if let Some(chunk) = data.get(start..start + 8) {
        bytes.copy_from_slice(chunk);
    }
    f64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    let current = read_f64(data, 0);
    let warning = read_f64(data, 1);
    let emergency = read_f64(data, 2);
    let curve = read_f64(data, 3);

    // Accepted inputs always land in [0, 1]; rejected ones never panic.
    if let Ok(percent) = calculate_throttle_percent_with_curve(current, warning, emergency, curve)
    {
        assert!((0.0..=1.0).contains(&percent));
        if current <= warning {
            assert!(percent.to_bits() == 0.0f64.to_bits());
        }
        if current >= emergency {
            assert!(percent.to_bits() == 1.0f64.to_bits());
        }
        if current > warning && current < emergency {
            assert!(percent > 0.0 && percent < 1.0);
        }
    }

    if let Ok(shape) = ThrottleCurve::new(warning, emergency, curve) {
        let lut = shape.to_lut();
        assert!((0.0..=1.0).contains(&lut.lookup(current)));
        assert!(lut.is_monotonic());
    }
});
