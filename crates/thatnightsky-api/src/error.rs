use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thatnightsky_core::error::NightSkyError;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<NightSkyError> for ApiError {
    fn from(err: NightSkyError) -> Self {
        match &err {
            NightSkyError::InvalidTime { .. } => {
                Self::bad_request("Invalid local time").with_details(err.to_string())
            }
            NightSkyError::Geocode { .. } => {
                Self::bad_request("Address could not be resolved").with_details(err.to_string())
            }
            NightSkyError::InvalidObserver { .. } => {
                Self::bad_request("Invalid observer").with_details(err.to_string())
            }
            NightSkyError::ConfigInvalid { .. } => {
                Self::bad_request("Invalid chart settings").with_details(err.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Request failed");
                Self::internal("Internal error").with_details(err.to_string())
            }
        }
    }
}
