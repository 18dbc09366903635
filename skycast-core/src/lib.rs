//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client and its error mapping
//! - The query pipeline: validation, icon classification, daily
//!   forecast sampling, search history
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries
//! or front ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod history;
pub mod icon;
pub mod model;
pub mod service;
pub mod source;

pub use config::Config;
pub use error::WeatherError;
pub use forecast::sample_daily;
pub use history::{HistoryRecord, SearchHistory};
pub use icon::IconCategory;
pub use model::{CurrentConditions, ForecastEntry, Units, WeatherReport};
pub use service::WeatherService;
pub use source::{WeatherSource, openweather::OpenWeatherClient};
