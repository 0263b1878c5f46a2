//! Data models for the AQI advisor
//!
//! This module contains the core domain models organized by concern:
//! - Location: queries, geocoder matches and resolved places
//! - Air quality: current readings, forecast samples and daily maxima
//! - Report: the response aggregate and advisory text

pub mod air_quality;
pub mod location;
pub mod report;

// Re-export all public types for convenient access
pub use air_quality::{DailyForecast, ForecastSample, PollutantReading};
pub use location::{Coordinates, GeocodeMatch, LocationQuery, ResolvedLocation, UNKNOWN_LOCATION_NAME};
pub use report::{Advisory, AqiReport};
