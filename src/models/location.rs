//! Location models: what the caller asks for, what the geocoder returns,
//! and the resolved place a report is built for

use serde::{Deserialize, Serialize};

use crate::{AqiError, Result};

/// Display name used when reverse geocoding finds nothing
pub const UNKNOWN_LOCATION_NAME: &str = "Your Location";

/// The two accepted ways of asking for a location
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text city name, resolved by forward geocoding
    City(String),
    /// Latitude/longitude pair, named by reverse geocoding
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Build a query from raw request parameters.
    ///
    /// A non-empty city wins. Otherwise both `lat` and `lon` must be present
    /// and parse as floats. Empty strings count as absent.
    pub fn from_params(city: Option<&str>, lat: Option<&str>, lon: Option<&str>) -> Result<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        if let Some(city) = present(city) {
            return Ok(LocationQuery::City(city.to_string()));
        }

        match (present(lat), present(lon)) {
            (Some(lat), Some(lon)) => Ok(LocationQuery::Coordinates {
                lat: parse_coordinate("latitude", lat)?,
                lon: parse_coordinate("longitude", lon)?,
            }),
            _ => Err(AqiError::MissingParameters),
        }
    }
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AqiError::invalid_parameter(name, raw))
}

/// A latitude/longitude pair; never one without the other
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One entry of a geocoding provider's answer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeocodeMatch {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodeMatch {
    /// Compose "name, state, country", "name, country" or just the name.
    ///
    /// `fallback` stands in for a missing `name`.
    #[must_use]
    pub fn display_name(&self, fallback: &str) -> String {
        let base = self.name.as_deref().unwrap_or(fallback);
        match (&self.state, &self.country) {
            (Some(state), Some(country)) => format!("{base}, {state}, {country}"),
            (None, Some(country)) => format!("{base}, {country}"),
            _ => base.to_string(),
        }
    }
}

/// Canonical coordinates and the name shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coords: Coordinates,
    pub name: String,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(lat: f64, lon: f64, name: String) -> Self {
        Self {
            coords: Coordinates { lat, lon },
            name,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.coords.lat, self.coords.lon)
    }
}
