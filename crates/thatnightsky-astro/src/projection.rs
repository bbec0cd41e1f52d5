//! Stereographic projection of the visible hemisphere
//!
//! The projection point is the nadir and the image plane is tangent at the
//! zenith, scaled so the horizon lands on the chart radius. North is up and
//! azimuth runs clockwise, so east is on the right.

/// Distance from the chart centre for an altitude in degrees
///
/// Zenith maps to 0 and the horizon to `radius`.
pub fn projected_radius(alt_deg: f64, radius: f64) -> f64 {
    radius * ((90.0 - alt_deg) / 2.0).to_radians().tan()
}

/// Chart coordinates (x, y) for a horizontal position
pub fn stereographic(alt_deg: f64, az_deg: f64, radius: f64) -> (f64, f64) {
    let r = projected_radius(alt_deg, radius);
    let (sin_az, cos_az) = az_deg.to_radians().sin_cos();
    (r * sin_az, r * cos_az)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zenith_maps_to_centre() {
        let (x, y) = stereographic(90.0, 123.0, 1.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_horizon_maps_to_radius() {
        assert_abs_diff_eq!(projected_radius(0.0, 1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(projected_radius(0.0, 250.0), 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compass_orientation() {
        let (x, y) = stereographic(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);

        let (x, y) = stereographic(0.0, 90.0, 1.0);
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);

        let (x, y) = stereographic(0.0, 180.0, 1.0);
        assert_abs_diff_eq!(y, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);

        let (x, _) = stereographic(0.0, 270.0, 1.0);
        assert_abs_diff_eq!(x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_forty_five_degrees() {
        // tan(22.5°) = sqrt(2) - 1
        assert_abs_diff_eq!(projected_radius(45.0, 1.0), 2f64.sqrt() - 1.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_radius_strictly_decreasing(a in 0.0..89.9f64, delta in 0.01..10.0f64) {
            let b = (a + delta).min(90.0);
            prop_assert!(projected_radius(b, 1.0) < projected_radius(a, 1.0));
        }

        #[test]
        fn prop_visible_stars_stay_inside_chart(alt in 0.0..=90.0f64, az in 0.0..360.0f64) {
            let (x, y) = stereographic(alt, az, 1.0);
            prop_assert!(x.hypot(y) <= 1.0 + 1e-12);
        }
    }
}
