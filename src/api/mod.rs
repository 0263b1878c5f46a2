use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use std::sync::Arc;

use crate::Result;
use crate::models::{AqiReport, LocationQuery};
use crate::report::ReportService;

/// Raw query values of `/get_aqi_data`; parsed further by [`LocationQuery`]
#[derive(Debug, Default, PartialEq)]
pub struct AqiParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl AqiParams {
    /// Collect known keys; the first occurrence of a repeated key wins
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut params.city,
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

pub fn router(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/get_aqi_data", get(get_aqi_data))
        .with_state(service)
}

async fn get_aqi_data(
    State(service): State<Arc<ReportService>>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<AqiReport>> {
    let Query(pairs) = query?;
    let params = AqiParams::from_pairs(pairs);

    let query = LocationQuery::from_params(
        params.city.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    )?;

    let report = service.build_report(&query).await?;
    Ok(Json(report))
}
