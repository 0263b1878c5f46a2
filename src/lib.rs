//! `aqi-advisor` - Air quality lookups with AI-phrased health advice
//!
//! This library resolves a city or coordinate pair, fetches current and
//! forecast air pollution data, condenses the forecast into daily maxima and
//! asks a generative-text model for health recommendations.

pub mod advisory;
pub mod air_quality;
pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod openweather;
pub mod report;
pub mod web;

// Re-export core types for public API
pub use advisory::{AdvisoryGenerator, GeminiClient, TextGenerator};
pub use air_quality::AirQualityProvider;
pub use config::AdvisorConfig;
pub use error::AqiError;
pub use location_resolver::{GeocodingProvider, LocationResolver};
pub use models::{AqiReport, DailyForecast, ForecastSample, LocationQuery, PollutantReading};
pub use openweather::OpenWeatherClient;
pub use report::ReportService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AqiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
