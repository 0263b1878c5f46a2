//! Daily forecast aggregation
//!
//! Reduces the provider's hourly forecast into one worst-case index per UTC
//! day for the days following the first forecast day.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{DailyForecast, ForecastSample};

/// Seconds per UTC day bucket
pub const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Number of days returned after the first bucket
pub const FORECAST_DAYS: usize = 5;

/// UTC day bucket of a Unix timestamp (floor division)
#[must_use]
pub fn day_bucket(dt: i64) -> i64 {
    dt.div_euclid(SECONDS_PER_DAY)
}

/// Group samples by UTC day, keep the max index per day, skip the earliest
/// day and return up to [`FORECAST_DAYS`] days in ascending order.
///
/// Each entry carries the timestamp of the first sample seen for its day.
#[must_use]
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    let mut days: BTreeMap<i64, DailyForecast> = BTreeMap::new();

    for sample in samples {
        days.entry(day_bucket(sample.dt))
            .and_modify(|day| day.aqi = day.aqi.max(sample.aqi))
            .or_insert(DailyForecast {
                dt: sample.dt,
                aqi: sample.aqi,
            });
    }

    let daily: Vec<DailyForecast> = days.into_values().skip(1).take(FORECAST_DAYS).collect();

    debug!(
        "Aggregated {} forecast samples into {} days: {:?}",
        samples.len(),
        daily.len(),
        daily
            .iter()
            .map(|d| format!("{}={}", d.date().map_or_else(|| d.dt.to_string(), |n| n.to_string()), d.aqi))
            .collect::<Vec<_>>()
    );

    daily
}
