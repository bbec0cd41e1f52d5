use crate::ports::{GeocodedPlace, Geocoder};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::Lang;

/// User agent required by the Nominatim usage policy
pub const USER_AGENT: &str = "ThatNightSky/0.1 (https://github.com/tae0y/that-night-sky)";

/// OpenStreetMap Nominatim geocoder
pub struct NominatimGeocoder {
    /// Base URL (e.g., "https://nominatim.openstreetmap.org")
    base_url: String,

    /// Preferred language of the returned display name
    lang: Lang,

    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a geocoder against the public endpoint
    pub fn new(lang: Lang, timeout: Duration) -> Result<Self> {
        Self::with_base_url("https://nominatim.openstreetmap.org", lang, timeout)
    }

    /// Create a geocoder against a custom endpoint
    pub fn with_base_url(
        base_url: impl Into<String>,
        lang: Lang,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NightSkyError::ConfigInvalid {
                key: "http_client".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.into(),
            lang,
            client,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.base_url.trim_end_matches('/')),
            &[
                ("q", address),
                ("format", "json"),
                ("limit", "1"),
                ("accept-language", self.lang.code()),
            ],
        )
        .map_err(|e| NightSkyError::geocode(address, format!("Invalid Nominatim URL: {}", e)))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            NightSkyError::geocode(address, format!("Failed to reach Nominatim: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NightSkyError::geocode(
                address,
                format!("Nominatim API error ({}): {}", status, error_text),
            ));
        }

        let results: Vec<NominatimResult> = response.json().await.map_err(|e| {
            NightSkyError::geocode(address, format!("Failed to parse Nominatim response: {}", e))
        })?;

        first_place(results, address)
    }

    fn name(&self) -> &str {
        "nominatim"
    }
}

/// One entry of a Nominatim `/search` reply
#[derive(Debug, Deserialize)]
pub struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Take the best match of a Nominatim reply
pub fn first_place(results: Vec<NominatimResult>, address: &str) -> Result<Option<GeocodedPlace>> {
    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };

    let parse = |value: &str, name: &str| {
        value.trim().parse::<f64>().map_err(|_| {
            NightSkyError::geocode(address, format!("Invalid Nominatim {} '{}'", name, value))
        })
    };

    Ok(Some(GeocodedPlace {
        latitude: parse(&first.lat, "lat")?,
        longitude: parse(&first.lon, "lon")?,
        display_name: if first.display_name.is_empty() {
            address.to_string()
        } else {
            first.display_name
        },
    }))
}
