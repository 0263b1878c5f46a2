//! Error types and HTTP mapping for the AQI advisor service

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the AQI advisor service
#[derive(Error, Debug)]
pub enum AqiError {
    /// Neither a city nor a coordinate pair was supplied
    #[error("City or Latitude/Longitude are required")]
    MissingParameters,

    /// A supplied query parameter could not be interpreted
    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: String, value: String },

    /// Forward geocoding returned no match for the city
    #[error("City not found: {city}")]
    NotFound { city: String },

    /// A provider answered, but the payload was empty or malformed
    #[error("{message}")]
    UpstreamData { message: String },

    /// A provider call failed at the transport or HTTP status level
    #[error("API request failed: {message}")]
    UpstreamRequest { message: String },

    /// The generative-text service failed to produce a recommendation
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Anything else
    #[error("An internal server error occurred: {message}")]
    Internal { message: String },
}

impl AqiError {
    pub fn invalid_parameter<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn not_found<S: Into<String>>(city: S) -> Self {
        Self::NotFound { city: city.into() }
    }

    pub fn upstream_data<S: Into<String>>(message: S) -> Self {
        Self::UpstreamData {
            message: message.into(),
        }
    }

    pub fn upstream_request<S: Into<String>>(message: S) -> Self {
        Self::UpstreamRequest {
            message: message.into(),
        }
    }

    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AqiError::MissingParameters | AqiError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            AqiError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AqiError {
    fn from(err: reqwest::Error) -> Self {
        AqiError::upstream_request(err.to_string())
    }
}

impl From<QueryRejection> for AqiError {
    fn from(rejection: QueryRejection) -> Self {
        AqiError::invalid_parameter("query string", rejection.body_text())
    }
}

impl IntoResponse for AqiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, "Request failed: {}", self);
        } else {
            tracing::info!(%status, "Request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AqiError::MissingParameters, StatusCode::BAD_REQUEST)]
    #[case(AqiError::invalid_parameter("latitude", "north"), StatusCode::BAD_REQUEST)]
    #[case(AqiError::not_found("Atlantis"), StatusCode::NOT_FOUND)]
    #[case(AqiError::upstream_data("Invalid current AQI data from API."), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AqiError::upstream_request("connection refused"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AqiError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_codes(#[case] err: AqiError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AqiError::MissingParameters.to_string(),
            "City or Latitude/Longitude are required"
        );
        assert_eq!(
            AqiError::not_found("Nonexistentville").to_string(),
            "City not found: Nonexistentville"
        );
        assert_eq!(
            AqiError::upstream_request("timed out").to_string(),
            "API request failed: timed out"
        );
        assert_eq!(
            AqiError::internal("oops").to_string(),
            "An internal server error occurred: oops"
        );
        assert_eq!(
            AqiError::upstream_data("Invalid forecast AQI data from API.").to_string(),
            "Invalid forecast AQI data from API."
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AqiError::not_found("Nowhere").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
