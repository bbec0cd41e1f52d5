use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NightSkyError, Result};

/// Result of geocoding + time conversion. Input to sky computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    /// Latitude in decimal degrees, north positive
    pub latitude: f64,

    /// Longitude in decimal degrees, east positive
    pub longitude: f64,

    /// Observation instant
    pub instant_utc: DateTime<Utc>,

    /// Normalized address returned by the geocoder (for display)
    #[serde(default)]
    pub address_display: String,
}

impl ObserverContext {
    /// Create a validated observer context
    pub fn new(
        latitude: f64,
        longitude: f64,
        instant_utc: DateTime<Utc>,
        address_display: impl Into<String>,
    ) -> Result<Self> {
        let context = Self {
            latitude,
            longitude,
            instant_utc,
            address_display: address_display.into(),
        };
        context.validate()?;
        Ok(context)
    }

    /// Check the coordinate ranges
    ///
    /// Contexts can also arrive through deserialization, so consumers call this
    /// again before computing anything.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(NightSkyError::InvalidObserver {
                reason: format!("latitude {} is outside [-90, 90]", self.latitude),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(NightSkyError::InvalidObserver {
                reason: format!("longitude {} is outside [-180, 180]", self.longitude),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1995, 1, 14, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_context() {
        let ctx = ObserverContext::new(35.18, 129.08, instant(), "Busan").unwrap();
        assert_eq!(ctx.latitude, 35.18);
        assert_eq!(ctx.address_display, "Busan");
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(ObserverContext::new(90.0, 180.0, instant(), "").is_ok());
        assert!(ObserverContext::new(-90.0, -180.0, instant(), "").is_ok());
    }

    #[test]
    fn test_out_of_range_latitude() {
        let err = ObserverContext::new(91.0, 0.0, instant(), "").unwrap_err();
        assert!(matches!(err, NightSkyError::InvalidObserver { .. }));
    }

    #[test]
    fn test_out_of_range_longitude() {
        let err = ObserverContext::new(0.0, -180.5, instant(), "").unwrap_err();
        assert!(matches!(err, NightSkyError::InvalidObserver { .. }));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(ObserverContext::new(f64::NAN, 0.0, instant(), "").is_err());
        assert!(ObserverContext::new(0.0, f64::INFINITY, instant(), "").is_err());
    }
}
