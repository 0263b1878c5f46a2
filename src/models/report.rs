//! The response aggregate returned by `/get_aqi_data`

use serde::{Deserialize, Serialize};

use super::{Coordinates, DailyForecast, PollutantReading};

/// Health advice text, safe to embed as a single-line JSON string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Advisory(String);

impl Advisory {
    #[must_use]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Full answer for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiReport {
    pub location_name: String,
    pub coords: Coordinates,
    pub current: PollutantReading,
    /// At most five days, ascending, starting the day after the first forecast day
    pub forecast: Vec<DailyForecast>,
    pub recommendations: Advisory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_report_json_shape() {
        let report = AqiReport {
            location_name: "Paris, FR".to_string(),
            coords: Coordinates { lat: 48.85, lon: 2.35 },
            current: PollutantReading {
                aqi_index: 2,
                pollutants: BTreeMap::from([("no2".to_string(), 14.1)]),
            },
            forecast: vec![DailyForecast { dt: 86_400, aqi: 3 }],
            recommendations: Advisory::new("Enjoy the outdoors."),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["location_name"], "Paris, FR");
        assert_eq!(json["coords"]["lat"], 48.85);
        assert_eq!(json["coords"]["lon"], 2.35);
        assert_eq!(json["current"]["aqi_index"], 2);
        assert_eq!(json["current"]["pollutants"]["no2"], 14.1);
        assert_eq!(json["forecast"][0]["dt"], 86_400);
        assert_eq!(json["forecast"][0]["aqi"], 3);
        assert_eq!(json["recommendations"], "Enjoy the outdoors.");
    }
}
