//! Equatorial to horizontal coordinate transformation
//!
//! Works on unit vectors throughout, so the celestial poles and the zenith need
//! no special casing except for the azimuth of a vertical direction.

use crate::precession::PrecessionMatrix;
use crate::time::{julian_date, local_sidereal_deg, normalize_degrees};
use chrono::{DateTime, Utc};
use nalgebra::{Matrix3, RowVector3, Vector3};

/// Horizontal projections shorter than this are treated as vertical
pub const VERTICAL_EPSILON: f64 = 1e-12;

/// Altitude/azimuth pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    /// Degrees above the horizon, in [-90, 90]
    pub alt_deg: f64,

    /// Degrees clockwise from north, in [0, 360)
    pub az_deg: f64,
}

/// Unit vector for equatorial coordinates in degrees
pub fn unit_vector(ra_deg: f64, dec_deg: f64) -> Vector3<f64> {
    let (sin_ra, cos_ra) = ra_deg.to_radians().sin_cos();
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Equatorial coordinates (ra, dec) in degrees for a unit vector
pub fn vector_to_equatorial(v: &Vector3<f64>) -> (f64, f64) {
    let ra = normalize_degrees(v.y.atan2(v.x).to_degrees());
    let dec = v.z.clamp(-1.0, 1.0).asin().to_degrees();
    (ra, dec)
}

/// Local horizon frame of one observer at one instant
///
/// Precession, sidereal rotation and latitude tilt are folded into one
/// matrix whose rows are the local north, east and up directions.
#[derive(Debug, Clone, Copy)]
pub struct HorizonFrame {
    rotation: Matrix3<f64>,
}

impl HorizonFrame {
    /// Frame for a geographic position (degrees, east positive) and instant
    pub fn for_observer(latitude: f64, longitude: f64, instant: &DateTime<Utc>) -> Self {
        let jd = julian_date(instant);
        let lst = local_sidereal_deg(jd, longitude);
        Self::new(latitude, lst, PrecessionMatrix::for_julian_date(jd))
    }

    /// Frame from a latitude, local sidereal time and precession matrix
    pub fn new(latitude: f64, lst_deg: f64, precession: PrecessionMatrix) -> Self {
        let (sin_lst, cos_lst) = lst_deg.to_radians().sin_cos();
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();

        let horizon = Matrix3::from_rows(&[
            RowVector3::new(-sin_lat * cos_lst, -sin_lat * sin_lst, cos_lat),
            RowVector3::new(-sin_lst, cos_lst, 0.0),
            RowVector3::new(cos_lat * cos_lst, cos_lat * sin_lst, sin_lat),
        ]);

        Self {
            rotation: horizon * precession.matrix(),
        }
    }

    /// Horizontal coordinates of a J2000 position
    pub fn to_horizontal(&self, ra_deg: f64, dec_deg: f64) -> Horizontal {
        let local = self.rotation * unit_vector(ra_deg, dec_deg);
        let (north, east, up) = (local.x, local.y, local.z);

        let horizontal = north.hypot(east);
        let alt_deg = up.atan2(horizontal).to_degrees();
        let az_deg = if horizontal < VERTICAL_EPSILON {
            0.0
        } else {
            normalize_degrees(east.atan2(north).to_degrees())
        };

        Horizontal { alt_deg, az_deg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn frame(latitude: f64, lst_deg: f64) -> HorizonFrame {
        HorizonFrame::new(latitude, lst_deg, PrecessionMatrix::identity())
    }

    #[test]
    fn test_star_on_meridian_at_zenith() {
        let h = frame(35.0, 120.0).to_horizontal(120.0, 35.0);
        assert_abs_diff_eq!(h.alt_deg, 90.0, epsilon = 1e-9);
        assert_eq!(h.az_deg, 0.0);
    }

    #[test]
    fn test_celestial_pole_altitude_equals_latitude() {
        let h = frame(35.18, 77.0).to_horizontal(0.0, 90.0);
        assert_abs_diff_eq!(h.alt_deg, 35.18, epsilon = 1e-9);
        assert_abs_diff_eq!(h.az_deg, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_southern_meridian_transit() {
        // Dec 0 on the meridian culminates due south at 90 - latitude
        let h = frame(40.0, 10.0).to_horizontal(10.0, 0.0);
        assert_abs_diff_eq!(h.alt_deg, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.az_deg, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rising_star_is_east() {
        // Hour angle -90 on the equator: on the eastern horizon
        let h = frame(0.0, 0.0).to_horizontal(90.0, 0.0);
        assert_abs_diff_eq!(h.alt_deg, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.az_deg, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_setting_star_is_west() {
        let h = frame(0.0, 90.0).to_horizontal(0.0, 0.0);
        assert_abs_diff_eq!(h.alt_deg, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.az_deg, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_observer_at_north_pole() {
        let h = frame(90.0, 200.0).to_horizontal(15.0, 45.0);
        assert_abs_diff_eq!(h.alt_deg, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_precession_folds_into_frame() {
        let precession = PrecessionMatrix::for_julian_date(2_462_088.69);
        let combined =
            HorizonFrame::new(35.18, 300.0, precession).to_horizontal(41.054_063, 49.227_750);

        let precessed = precession.apply(&unit_vector(41.054_063, 49.227_750));
        let (ra, dec) = vector_to_equatorial(&precessed);
        let stepwise = frame(35.18, 300.0).to_horizontal(ra, dec);

        assert_abs_diff_eq!(combined.alt_deg, stepwise.alt_deg, epsilon = 1e-9);
        assert_abs_diff_eq!(combined.az_deg, stepwise.az_deg, epsilon = 1e-9);
    }

    #[test]
    fn test_vector_round_trip() {
        let (ra, dec) = vector_to_equatorial(&unit_vector(283.5, -12.25));
        assert_abs_diff_eq!(ra, 283.5, epsilon = 1e-9);
        assert_abs_diff_eq!(dec, -12.25, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn prop_horizontal_ranges(
            latitude in -90.0..=90.0f64,
            lst in 0.0..360.0f64,
            ra in 0.0..360.0f64,
            dec in -90.0..=90.0f64,
        ) {
            let h = frame(latitude, lst).to_horizontal(ra, dec);
            prop_assert!(h.alt_deg.is_finite());
            prop_assert!((-90.0..=90.0).contains(&h.alt_deg));
            prop_assert!((0.0..360.0).contains(&h.az_deg));
        }
    }
}
