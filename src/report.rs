//! AQI report assembly
//!
//! Sequences location resolution, the two air quality lookups, forecast
//! aggregation and advisory generation for a single request.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use crate::Result;
use crate::advisory::AdvisoryGenerator;
use crate::air_quality::AirQualityProvider;
use crate::forecast;
use crate::location_resolver::{GeocodingProvider, LocationResolver};
use crate::models::{AqiReport, LocationQuery};

/// Stateless report builder shared by all requests
#[derive(Clone)]
pub struct ReportService {
    resolver: LocationResolver,
    air_quality: Arc<dyn AirQualityProvider>,
    advisor: AdvisoryGenerator,
}

impl ReportService {
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        air_quality: Arc<dyn AirQualityProvider>,
        advisor: AdvisoryGenerator,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            air_quality,
            advisor,
        }
    }

    /// Build the full report; the first failing stage ends the request
    #[instrument(skip(self))]
    pub async fn build_report(&self, query: &LocationQuery) -> Result<AqiReport> {
        let start = Instant::now();

        let location = self.resolver.resolve(query).await?;
        let (lat, lon) = (location.coords.lat, location.coords.lon);

        let current = self.air_quality.current(lat, lon).await?;
        let samples = self.air_quality.forecast(lat, lon).await?;
        let daily = forecast::aggregate(&samples);

        let recommendations = self.advisor.generate(&current).await;

        info!(
            "Built report for {} in {:.3}s ({} forecast days)",
            location.name,
            start.elapsed().as_secs_f64(),
            daily.len()
        );

        Ok(AqiReport {
            location_name: location.name,
            coords: location.coords,
            current,
            forecast: daily,
            recommendations,
        })
    }
}
