use crate::ports::{GeocodedPlace, Geocoder};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thatnightsky_core::error::{NightSkyError, Result};

/// Address lookup mode of the VWorld API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    /// Road-name address (도로명주소)
    Road,
    /// Parcel address (지번주소)
    Parcel,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Road => "ROAD",
            AddressType::Parcel => "PARCEL",
        }
    }
}

/// VWorld (Korean national spatial data portal) geocoder
///
/// Tries a road-address lookup first and falls back to a parcel-address
/// lookup when that finds nothing or fails.
pub struct VWorldGeocoder {
    /// Base URL (e.g., "https://api.vworld.kr")
    base_url: String,

    api_key: String,

    /// HTTP client with request timeout
    client: reqwest::Client,
}

impl VWorldGeocoder {
    /// Create a geocoder against the public endpoint
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url("https://api.vworld.kr", api_key, timeout)
    }

    /// Create a geocoder against a custom endpoint
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            NightSkyError::ConfigInvalid {
                key: "http_client".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Single lookup in one address mode
    pub async fn lookup(&self, address: &str, mode: AddressType) -> Result<Option<GeocodedPlace>> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/req/address", self.base_url.trim_end_matches('/')),
            &[
                ("service", "address"),
                ("request", "getCoord"),
                ("version", "2.0"),
                ("crs", "EPSG:4326"),
                ("format", "json"),
                ("type", mode.as_str()),
                ("address", address),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| NightSkyError::geocode(address, format!("Invalid VWorld URL: {}", e)))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            NightSkyError::geocode(address, format!("Failed to reach VWorld: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NightSkyError::geocode(
                address,
                format!("VWorld API error ({}): {}", status, error_text),
            ));
        }

        let envelope: VWorldEnvelope = response.json().await.map_err(|e| {
            NightSkyError::geocode(address, format!("Failed to parse VWorld response: {}", e))
        })?;

        parse_response(envelope.response, address)
    }
}

#[async_trait]
impl Geocoder for VWorldGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        let mut last_error = None;
        let mut answered = false;

        for mode in [AddressType::Road, AddressType::Parcel] {
            match self.lookup(address, mode).await {
                Ok(Some(place)) => {
                    tracing::debug!(mode = mode.as_str(), address, "VWorld match");
                    return Ok(Some(place));
                }
                Ok(None) => {
                    tracing::debug!(mode = mode.as_str(), address, "VWorld found nothing");
                    answered = true;
                }
                Err(e) => {
                    tracing::warn!(
                        mode = mode.as_str(),
                        address,
                        error = %e,
                        "VWorld lookup failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        // An error only surfaces when neither mode gave a definite answer
        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "vworld"
    }
}

/// Interpret the `response` object of a VWorld reply
pub fn parse_response(response: VWorldResponse, address: &str) -> Result<Option<GeocodedPlace>> {
    match response.status.as_str() {
        "OK" => {
            let point = response.result.map(|r| r.point).ok_or_else(|| {
                NightSkyError::geocode(address, "VWorld reply has no result point")
            })?;
            let longitude = point.x.as_f64(address)?;
            let latitude = point.y.as_f64(address)?;
            let display_name = response
                .refined
                .map(|r| r.text)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| address.to_string());
            Ok(Some(GeocodedPlace {
                latitude,
                longitude,
                display_name,
            }))
        }
        "NOT_FOUND" => Ok(None),
        other => {
            let detail = response
                .error
                .map(|e| format!("{} {}", e.code.unwrap_or_default(), e.text.unwrap_or_default()))
                .unwrap_or_default();
            Err(NightSkyError::geocode(
                address,
                format!("VWorld status {}: {}", other, detail.trim()),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct VWorldEnvelope {
    response: VWorldResponse,
}

/// `response` object of the VWorld address API
#[derive(Debug, Deserialize)]
pub struct VWorldResponse {
    pub status: String,
    #[serde(default)]
    refined: Option<VWorldRefined>,
    #[serde(default)]
    result: Option<VWorldResult>,
    #[serde(default)]
    error: Option<VWorldError>,
}

#[derive(Debug, Deserialize)]
struct VWorldRefined {
    text: String,
}

#[derive(Debug, Deserialize)]
struct VWorldResult {
    point: VWorldPoint,
}

#[derive(Debug, Deserialize)]
struct VWorldPoint {
    x: Coordinate,
    y: Coordinate,
}

#[derive(Debug, Deserialize)]
struct VWorldError {
    code: Option<String>,
    text: Option<String>,
}

/// VWorld sends coordinates as strings; accept numbers too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn as_f64(&self, address: &str) -> Result<f64> {
        match self {
            Coordinate::Number(n) => Ok(*n),
            Coordinate::Text(s) => s.trim().parse().map_err(|_| {
                NightSkyError::geocode(address, format!("Invalid VWorld coordinate '{}'", s))
            }),
        }
    }
}
