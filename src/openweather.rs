//! OpenWeather API client
//!
//! Implements geocoding (direct and reverse) and air pollution lookups
//! against OpenWeather. Every call is attempted once; the client carries an
//! explicit request timeout.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::air_quality::{self, AirQualityProvider};
use crate::config::OpenWeatherConfig;
use crate::location_resolver::GeocodingProvider;
use crate::models::{ForecastSample, GeocodeMatch, PollutantReading};
use crate::{AqiError, Result};

const USER_AGENT: &str = concat!("aqi-advisor/", env!("CARGO_PKG_VERSION"));
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// HTTP client for the OpenWeather geocoding and air pollution APIs
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a new client from configuration
    pub fn new(config: &OpenWeatherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AqiError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    /// GET `path` with the given query and return the body of a 2xx response
    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AqiError::upstream_request(e.without_url().to_string()))?;

        let status = response.status();
        debug!("OpenWeather {} answered {} in {:.3}s", path, status, start.elapsed().as_secs_f64());

        if !status.is_success() {
            return Err(AqiError::upstream_request(format!(
                "{} {} for {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
                path
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AqiError::upstream_request(e.without_url().to_string()))?;

        let elapsed = start.elapsed();
        if elapsed > SLOW_RESPONSE {
            warn!("Slow OpenWeather response for {}: {:.3}s", path, elapsed.as_secs_f64());
        }

        Ok(body)
    }

    async fn geocode(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<GeocodeMatch>> {
        let body = self.get_text(path, query).await?;
        let matches: Vec<GeocodeMatch> = serde_json::from_str::<Option<Vec<GeocodeMatch>>>(&body)
            .map_err(|e| AqiError::upstream_data(format!("Invalid geocoding data from API: {e}")))?
            .unwrap_or_default();

        debug!(
            "Geocoding results: {:?}",
            matches
                .iter()
                .map(|m| format!("{:?} ({:.4}, {:.4})", m.name, m.lat, m.lon))
                .collect::<Vec<_>>()
        );

        Ok(matches)
    }
}

#[async_trait]
impl GeocodingProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn direct(&self, query: &str) -> Result<Vec<GeocodeMatch>> {
        let matches = self
            .geocode(
                "/geo/1.0/direct",
                &[("q", query.to_string()), ("limit", "1".to_string())],
            )
            .await?;

        if matches.is_empty() {
            warn!("No geocoding results for '{}'", query);
        }
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Vec<GeocodeMatch>> {
        self.geocode(
            "/geo/1.0/reverse",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .await
    }
}

#[async_trait]
impl AirQualityProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<PollutantReading> {
        let body = self
            .get_text(
                "/data/2.5/air_pollution",
                &[("lat", lat.to_string()), ("lon", lon.to_string())],
            )
            .await?;

        let reading = air_quality::current_from_body(&body)?;
        info!("Current AQI {} ({})", reading.aqi_index, reading.format_pollutants());
        Ok(reading)
    }

    #[instrument(skip(self))]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>> {
        let body = self
            .get_text(
                "/data/2.5/air_pollution/forecast",
                &[("lat", lat.to_string()), ("lon", lon.to_string())],
            )
            .await?;

        let samples = air_quality::forecast_from_body(&body)?;
        info!("Retrieved {} forecast samples", samples.len());
        Ok(samples)
    }
}
