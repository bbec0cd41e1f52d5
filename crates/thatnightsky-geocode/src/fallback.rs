use crate::ports::{GeocodedPlace, Geocoder};
use async_trait::async_trait;
use thatnightsky_core::error::Result;

/// Asks a secondary provider when the primary finds nothing or fails
pub struct FallbackGeocoder<P, S> {
    primary: P,
    secondary: S,
}

impl<P: Geocoder, S: Geocoder> FallbackGeocoder<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: Geocoder, S: Geocoder> Geocoder for FallbackGeocoder<P, S> {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        match self.primary.geocode(address).await {
            Ok(Some(place)) => return Ok(Some(place)),
            Ok(None) => tracing::debug!(
                primary = self.primary.name(),
                secondary = self.secondary.name(),
                address,
                "No match, trying secondary geocoder"
            ),
            Err(e) => tracing::warn!(
                primary = self.primary.name(),
                secondary = self.secondary.name(),
                address,
                error = %e,
                "Primary geocoder failed, trying secondary"
            ),
        }

        self.secondary.geocode(address).await
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::StaticGeocoder;

    fn busan() -> GeocodedPlace {
        GeocodedPlace {
            latitude: 35.18,
            longitude: 129.08,
            display_name: "Busan".to_string(),
        }
    }

    #[tokio::test]
    async fn test_primary_match_skips_secondary() {
        let primary = StaticGeocoder::new().with_place("부산", busan());
        let secondary = StaticGeocoder::new();
        let chain = FallbackGeocoder::new(&primary, &secondary);

        assert!(chain.geocode("부산").await.unwrap().is_some());
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_secondary_used_on_miss_and_failure() {
        let secondary = StaticGeocoder::new().with_place("부산", busan());

        let empty = StaticGeocoder::new();
        let chain = FallbackGeocoder::new(&empty, &secondary);
        assert_eq!(chain.geocode("부산").await.unwrap(), Some(busan()));

        let broken = StaticGeocoder::failing("connection refused");
        let chain = FallbackGeocoder::new(&broken, &secondary);
        assert_eq!(chain.geocode("부산").await.unwrap(), Some(busan()));
        assert_eq!(secondary.call_count(), 2);
    }
}
