//! IAU 1976 precession from J2000.0 to the equinox of date

use crate::time::julian_centuries;
use nalgebra::{Matrix3, Rotation3, Vector3};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Rotation taking J2000 equatorial unit vectors to the mean equator of date
///
/// Built once per request and applied to every star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionMatrix {
    m: Matrix3<f64>,
}

impl PrecessionMatrix {
    /// No precession (epoch J2000.0)
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    /// Precession matrix for a Julian date (Meeus 21.2 angles)
    ///
    /// P = Rz(z) · Ry(-θ) · Rz(ζ): the middle rotation tilts the x axis
    /// towards +z, which is a negative turn about y.
    pub fn for_julian_date(jd: f64) -> Self {
        let (zeta, z, theta) = precession_angles(jd);

        let rz_zeta = Rotation3::from_axis_angle(&Vector3::z_axis(), zeta);
        let ry_theta = Rotation3::from_axis_angle(&Vector3::y_axis(), -theta);
        let rz_z = Rotation3::from_axis_angle(&Vector3::z_axis(), z);

        Self {
            m: (rz_z * ry_theta * rz_zeta).into_inner(),
        }
    }

    /// Apply the rotation to a vector
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.m * v
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.m
    }
}

/// Precession angles (zeta, z, theta) in radians
pub fn precession_angles(jd: f64) -> (f64, f64, f64) {
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;

    let zeta = 2306.2181 * t + 0.30188 * t2 + 0.017998 * t3;
    let z = 2306.2181 * t + 1.09468 * t2 + 0.018203 * t3;
    let theta = 2004.3109 * t - 0.42665 * t2 - 0.041833 * t3;

    (zeta * ARCSEC_TO_RAD, z * ARCSEC_TO_RAD, theta * ARCSEC_TO_RAD)
}
