//! Air quality provider seam and payload validation
//!
//! Providers return raw bodies to [`current_from_body`] and
//! [`forecast_from_body`], which tell malformed or empty payloads apart from
//! transport failures.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{ForecastSample, PollutantReading};
use crate::{AqiError, Result};

pub const INVALID_CURRENT_DATA: &str = "Invalid current AQI data from API.";
pub const INVALID_FORECAST_DATA: &str = "Invalid forecast AQI data from API.";

/// Source of current and forecast pollution data
#[async_trait]
pub trait AirQualityProvider: Send + Sync {
    /// Current reading at the given coordinates
    async fn current(&self, lat: f64, lon: f64) -> Result<PollutantReading>;

    /// Forecast samples at the given coordinates, typically hourly
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>>;
}

#[derive(Debug, Deserialize)]
struct PollutionResponse<T> {
    list: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct PollutionMain {
    aqi: u32,
}

#[derive(Debug, Deserialize)]
struct CurrentEntry {
    main: PollutionMain,
    components: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: PollutionMain,
}

fn parse_list<T: DeserializeOwned>(body: &str, invalid: &str) -> Result<Vec<T>> {
    let parsed: Option<PollutionResponse<T>> = serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Unparseable air pollution payload: {}", e);
        AqiError::upstream_data(invalid)
    })?;

    parsed
        .and_then(|response| response.list)
        .ok_or_else(|| AqiError::upstream_data(invalid))
}

/// Validate a current-pollution body and take its first entry
pub fn current_from_body(body: &str) -> Result<PollutantReading> {
    let entry = parse_list::<CurrentEntry>(body, INVALID_CURRENT_DATA)?
        .into_iter()
        .next()
        .ok_or_else(|| AqiError::upstream_data(INVALID_CURRENT_DATA))?;

    Ok(PollutantReading {
        aqi_index: entry.main.aqi,
        pollutants: entry.components,
    })
}

/// Validate a forecast-pollution body; an empty list is valid
pub fn forecast_from_body(body: &str) -> Result<Vec<ForecastSample>> {
    Ok(parse_list::<ForecastEntry>(body, INVALID_FORECAST_DATA)?
        .into_iter()
        .map(|entry| ForecastSample {
            dt: entry.dt,
            aqi: entry.main.aqi,
        })
        .collect())
}
