use std::sync::Arc;

use chrono::Local;

use crate::{
    error::WeatherError,
    forecast::sample_daily,
    history::SearchHistory,
    icon::IconCategory,
    model::{Units, WeatherReport},
    source::WeatherSource,
};

/// Drives one query end to end: validate, fetch, derive, log.
///
/// The service holds no per-query state; overlapping queries run
/// independently and only meet at the shared [`SearchHistory`] handle.
#[derive(Debug)]
pub struct WeatherService {
    source: Box<dyn WeatherSource>,
    history: Arc<SearchHistory>,
}

impl WeatherService {
    pub fn new(source: Box<dyn WeatherSource>, history: Arc<SearchHistory>) -> Self {
        Self { source, history }
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Answer one weather query.
    ///
    /// Both network calls must succeed before anything becomes visible:
    /// a failure at either step returns the error alone, with no partial
    /// result and no history entry. History is appended with the wall
    /// clock at the moment of success.
    pub async fn query(
        &self,
        location: &str,
        units: Units,
    ) -> Result<WeatherReport, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::input("Please enter a location."));
        }

        let current = self.source.current(location, units).await?;
        let entries = self.source.forecast(location, units).await?;

        let icon = IconCategory::from_condition(&current.condition);
        let daily = sample_daily(entries);

        self.history.append(location, Local::now());

        Ok(WeatherReport {
            current,
            icon,
            daily,
            units,
        })
    }
}
