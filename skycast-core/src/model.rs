use serde::{Deserialize, Serialize};

use crate::icon::IconCategory;

/// Measurement system the user selected for one query.
///
/// A single selection drives both the API request parameter and every
/// rendered unit suffix of that query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Exact token the OpenWeatherMap `units` query parameter expects.
    pub fn api_code(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temp_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    /// Human-facing label for unit pickers.
    pub fn label(self) -> &'static str {
        match self {
            Units::Metric => "Metric (°C, m/s)",
            Units::Imperial => "Imperial (°F, mph)",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_code())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported values: metric, imperial."
            )),
        }
    }
}

/// Current conditions for one location, already in the requested units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition: String,
}

/// One step of the 3-hour-cadence forecast list.
///
/// `timestamp` is the API's display string (`YYYY-MM-DD HH:MM:SS`), kept
/// verbatim for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: String,
    pub temperature: f64,
    pub condition: String,
}

/// Structured result of one successful query, owned by the caller for
/// the duration of one render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub icon: IconCategory,
    pub daily: Vec<ForecastEntry>,
    pub units: Units,
}
