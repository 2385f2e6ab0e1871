//! Core library for the `nalssi` weather tool.
//!
//! This crate defines:
//! - A scraping client for the Naver weather site (location search, weather page)
//! - Extractors turning the page's scripts and markup into a stable schema
//! - Shared domain models and the service traits UIs program against
//! - Configuration & last-picked location storage
//!
//! It is used by `nalssi-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod location;
pub mod model;
pub mod patterns;
pub mod provider;
pub mod service;
pub mod session;

pub use client::{Endpoints, NaverClient};
pub use config::{Config, EndpointsConfig};
pub use error::{NalssiError, Result};
pub use extract::parse_weather_page;
pub use model::{
    CurrentConditions, DailyForecast, Forecast, Location, Scale, Temperature, Weather,
    WeeklyForecast,
};
pub use provider::WeatherSource;
pub use service::{LocationService, WeatherService, client_from_config};
pub use session::Session;
