use crate::ports::Geocoder;
use crate::time::parse_local_time;
use chrono::FixedOffset;
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::{ObserverContext, QueryInput};

/// Turns a raw query into an observer position and UTC instant
pub struct ObserverResolver<G> {
    geocoder: G,
    offset: FixedOffset,
}

impl<G: Geocoder> ObserverResolver<G> {
    /// Resolver interpreting local times at `offset`
    pub fn new(geocoder: G, offset: FixedOffset) -> Self {
        Self { geocoder, offset }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Resolve the address and local time of a query
    ///
    /// The time string is checked before any network call is made.
    pub async fn resolve(&self, query: &QueryInput) -> Result<ObserverContext> {
        let instant = parse_local_time(&query.when, self.offset)?;

        let address = query.address.trim();
        if address.is_empty() {
            return Err(NightSkyError::geocode(&query.address, "address is empty"));
        }

        let place = self
            .geocoder
            .geocode(address)
            .await?
            .ok_or_else(|| NightSkyError::geocode(address, "address not found"))?;

        tracing::info!(
            geocoder = self.geocoder.name(),
            address,
            latitude = place.latitude,
            longitude = place.longitude,
            instant = %instant,
            "Resolved observer"
        );

        ObserverContext::new(place.latitude, place.longitude, instant, place.display_name)
    }
}
