//! Interpolation helpers shared by fusion, band averaging and the export.

use crate::units::normalize_degrees;

/// Position of `target` between `low` and `high` as a fraction of the band.
///
/// Returns `None` for a zero-height band. This is the only place a band
/// height is divided by, so every caller skips degenerate pairs the same way.
pub fn band_fraction(low: f64, high: f64, target: f64) -> Option<f64> {
    let height = high - low;
    if height == 0.0 || !height.is_finite() {
        None
    } else {
        Some((target - low) / height)
    }
}

/// Wrap-aware interpolation between two directions (degrees).
///
/// When the raw difference is under 180 degrees the directions are blended
/// linearly. Otherwise both are rotated by 180, blended, and rotated back, so
/// 350 -> 10 passes through North instead of South.
pub fn interpolate_direction(from: f64, to: f64, fraction: f64) -> f64 {
    if (to - from).abs() < 180.0 {
        normalize_degrees(from + fraction * (to - from))
    } else {
        let a = normalize_degrees(from - 180.0);
        let b = normalize_degrees(to - 180.0);
        normalize_degrees(a + fraction * (b - a) + 180.0)
    }
}

/// Plain linear interpolation.
pub fn lerp(from: f64, to: f64, fraction: f64) -> f64 {
    from + fraction * (to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_height_band_has_no_fraction() {
        assert_eq!(band_fraction(100.0, 100.0, 100.0), None);
        assert_eq!(band_fraction(0.0, 200.0, 50.0), Some(0.25));
    }

    #[test]
    fn short_arc_is_linear() {
        assert_abs_diff_eq!(interpolate_direction(80.0, 100.0, 0.5), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate_direction(100.0, 80.0, 0.25), 95.0, epsilon = 1e-12);
    }

    #[test]
    fn long_arc_wraps_through_north() {
        assert_abs_diff_eq!(interpolate_direction(350.0, 10.0, 0.5), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(interpolate_direction(350.0, 10.0, 0.25), 355.0, epsilon = 1e-9);
        assert_abs_diff_eq!(interpolate_direction(10.0, 350.0, 0.75), 355.0, epsilon = 1e-9);
    }

    #[test]
    fn endpoints_are_preserved() {
        assert_abs_diff_eq!(interpolate_direction(340.0, 20.0, 0.0), 340.0, epsilon = 1e-9);
        assert_abs_diff_eq!(interpolate_direction(340.0, 20.0, 1.0), 20.0, epsilon = 1e-9);
    }
}
