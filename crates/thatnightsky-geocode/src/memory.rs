//! In-memory geocoder for development and testing.

use crate::ports::{GeocodedPlace, Geocoder};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thatnightsky_core::error::{NightSkyError, Result};

/// Answers from a fixed address table
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, GeocodedPlace>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geocoder whose every lookup fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Register an address
    pub fn with_place(mut self, address: impl Into<String>, place: GeocodedPlace) -> Self {
        self.places.insert(address.into(), place);
        self
    }

    /// Number of lookups performed
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(NightSkyError::geocode(address, reason.clone()));
        }
        Ok(self.places.get(address.trim()).cloned())
    }

    fn name(&self) -> &str {
        "static"
    }
}
