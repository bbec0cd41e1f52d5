//! Request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thatnightsky_core::models::Lang;

/// `POST /api/v1/sky` body
#[derive(Debug, Deserialize)]
pub struct SkyRequest {
    pub address: String,
    pub when: String,
    #[serde(default)]
    pub narrative: bool,
    pub lang: Option<Lang>,
    pub limiting_magnitude: Option<f64>,
}

/// `POST /api/v1/sky/observer` body
#[derive(Debug, Deserialize)]
pub struct ObserverRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub instant: DateTime<Utc>,
    #[serde(default)]
    pub address_display: String,
    pub limiting_magnitude: Option<f64>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "thatnightsky-api",
        }
    }
}
