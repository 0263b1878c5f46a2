//! Location Resolution Module
//!
//! This module resolves a city name or a coordinate pair into canonical
//! coordinates and a display name, through a geocoding provider.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{GeocodeMatch, LocationQuery, ResolvedLocation, UNKNOWN_LOCATION_NAME};
use crate::{AqiError, Result};

/// Forward and reverse geocoding
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Matches for a free-text place name, best first
    async fn direct(&self, query: &str) -> Result<Vec<GeocodeMatch>>;

    /// Places at the given coordinates, best first
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Vec<GeocodeMatch>>;
}

/// Service for resolving location queries
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn GeocodingProvider>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn GeocodingProvider>) -> Self {
        Self { geocoder }
    }

    /// Resolve a location query into coordinates and a display name
    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation> {
        debug!("Resolving location query: {:?}", query);

        let location = match query {
            LocationQuery::City(city) => self.resolve_city(city).await?,
            LocationQuery::Coordinates { lat, lon } => self.resolve_coordinates(*lat, *lon).await?,
        };

        info!(
            "Resolved location: {} at ({})",
            location.name,
            location.format_coordinates()
        );

        Ok(location)
    }

    /// Forward geocode a city; the first match is authoritative
    async fn resolve_city(&self, city: &str) -> Result<ResolvedLocation> {
        debug!("Geocoding city: {}", city);

        let first = self
            .geocoder
            .direct(city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AqiError::not_found(city))?;

        Ok(ResolvedLocation::new(first.lat, first.lon, first.display_name(city)))
    }

    /// Reverse geocode coordinates; the requested coordinates are kept
    async fn resolve_coordinates(&self, lat: f64, lon: f64) -> Result<ResolvedLocation> {
        debug!("Reverse geocoding coordinates: ({}, {})", lat, lon);

        let name = match self.geocoder.reverse(lat, lon).await?.into_iter().next() {
            Some(first) => first.display_name(UNKNOWN_LOCATION_NAME),
            None => {
                debug!("No reverse geocoding results found, using generic name");
                UNKNOWN_LOCATION_NAME.to_string()
            }
        };

        Ok(ResolvedLocation::new(lat, lon, name))
    }
}
