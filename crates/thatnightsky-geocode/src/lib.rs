//! ThatNightSky Geocode - Address and local time resolution
//!
//! This crate defines the geocoding port, adapters for the VWorld and
//! Nominatim HTTP APIs, and the [`ObserverResolver`] that turns a raw query
//! into an [`ObserverContext`](thatnightsky_core::models::ObserverContext).

pub mod fallback;
pub mod memory;
pub mod nominatim;
pub mod ports;
pub mod resolver;
pub mod time;
pub mod vworld;

pub use fallback::FallbackGeocoder;
pub use memory::StaticGeocoder;
pub use nominatim::NominatimGeocoder;
pub use ports::{GeocodedPlace, Geocoder};
pub use resolver::ObserverResolver;
pub use time::parse_local_time;
pub use vworld::VWorldGeocoder;

use std::sync::Arc;
use std::time::Duration;
use thatnightsky_core::config::{LayeredConfig, Secrets};
use thatnightsky_core::error::Result;
use thatnightsky_core::models::Lang;

/// Pick the geocoder for a language
///
/// Korean queries go to VWorld when a key is configured, with Nominatim as
/// the fallback provider. Everything else goes straight to Nominatim.
pub fn build_geocoder(
    config: &LayeredConfig,
    secrets: &Secrets,
    lang: Lang,
) -> Result<Arc<dyn Geocoder>> {
    let timeout = Duration::from_secs(config.http_timeout_secs.value);
    let nominatim = NominatimGeocoder::new(lang, timeout)?;

    match (lang, secrets.vworld_api_key.as_deref()) {
        (Lang::Ko, Some(key)) => {
            let vworld = VWorldGeocoder::new(key, timeout)?;
            Ok(Arc::new(FallbackGeocoder::new(vworld, nominatim)))
        }
        _ => Ok(Arc::new(nominatim)),
    }
}
