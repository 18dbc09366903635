use serde::{Deserialize, Serialize};

/// Display bucket derived from a free-text condition descriptor.
///
/// The presentation layer resolves a category to an actual image asset;
/// the core only decides which bucket a condition falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Clear,
    CloudyRainy,
    Rainy,
    Snow,
    SunCloudy,
    Cloudy,
}

impl IconCategory {
    /// Classify a condition string by case-insensitive substring match.
    ///
    /// First match wins; the order matters because e.g. "light rain and
    /// clouds" satisfies both the cloud and rain predicates.
    pub fn from_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();

        if condition.contains("clear") {
            IconCategory::Clear
        } else if condition.contains("cloud") && condition.contains("rain") {
            IconCategory::CloudyRainy
        } else if condition.contains("rain") {
            IconCategory::Rainy
        } else if condition.contains("snow") {
            IconCategory::Snow
        } else if condition.contains("cloud") {
            IconCategory::SunCloudy
        } else {
            IconCategory::Cloudy
        }
    }

    /// Image file name for this category.
    pub fn asset_name(&self) -> &'static str {
        match self {
            IconCategory::Clear => "sun.png",
            IconCategory::CloudyRainy => "cloudy-rainy.png",
            IconCategory::Rainy => "rainy.png",
            IconCategory::Snow => "snow.png",
            IconCategory::SunCloudy => "sun-cloudy.png",
            IconCategory::Cloudy => "cloudy-grey.png",
        }
    }

    /// Terminal-friendly stand-in for the image asset.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Clear => "☀",
            IconCategory::CloudyRainy => "🌦",
            IconCategory::Rainy => "🌧",
            IconCategory::Snow => "❄",
            IconCategory::SunCloudy => "⛅",
            IconCategory::Cloudy => "☁",
        }
    }
}
