//! Air quality readings and forecast entries

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Current pollution snapshot for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// Provider-defined ordinal index (1 = good .. 5 = very poor for OpenWeather)
    pub aqi_index: u32,
    /// Pollutant name to concentration in µg/m³
    pub pollutants: BTreeMap<String, f64>,
}

impl PollutantReading {
    /// Render the pollutant map as `name: value` pairs for prompts and logs
    #[must_use]
    pub fn format_pollutants(&self) -> String {
        self.pollutants
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One provider-supplied forecast point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Unix timestamp in seconds
    pub dt: i64,
    pub aqi: u32,
}

/// Worst index of one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Timestamp of the first sample seen for the day
    pub dt: i64,
    /// Maximum index among that day's samples
    pub aqi: u32,
}

impl DailyForecast {
    /// UTC calendar date of the representative timestamp
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.dt, 0).map(|dt| dt.date_naive())
    }
}
