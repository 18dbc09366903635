use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry, Units},
};

pub mod openweather;

/// Seam between the query pipeline and the remote weather API.
///
/// Both operations are a single round trip: no retries, no caching. The
/// forecast list is returned as delivered, sorted ascending at the API's
/// 3-hour cadence.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(
        &self,
        location: &str,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(
        &self,
        location: &str,
        units: Units,
    ) -> Result<Vec<ForecastEntry>, WeatherError>;
}
