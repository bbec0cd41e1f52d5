//! Geocoding port definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thatnightsky_core::error::Result;

/// A resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Latitude in decimal degrees, north positive
    pub latitude: f64,

    /// Longitude in decimal degrees, east positive
    pub longitude: f64,

    /// Normalised address text returned by the provider
    pub display_name: String,
}

/// Port for address lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up an address
    ///
    /// # Returns
    /// `Ok(None)` when the provider has no match, `Err` when the provider
    /// could not be queried or answered with an error.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        (**self).geocode(address).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for &T {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        (**self).geocode(address).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
