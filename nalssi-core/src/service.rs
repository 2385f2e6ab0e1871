use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, Location, NaverClient, Weather, WeatherSource, error::Result};

/// Name → location lookup used by location pickers.
#[async_trait]
pub trait LocationService: Send + Sync + Debug {
    async fn search_location(&self, query: &str) -> Result<Vec<Location>>;
}

/// Weather lookup for a resolved location code.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn search_weather(&self, location_code: &str) -> Result<Weather>;

    async fn set_weather_source(&self, location_code: &str, source: WeatherSource) -> Result<()>;
}

#[async_trait]
impl LocationService for NaverClient {
    async fn search_location(&self, query: &str) -> Result<Vec<Location>> {
        NaverClient::search_location(self, query).await
    }
}

#[async_trait]
impl WeatherService for NaverClient {
    async fn search_weather(&self, location_code: &str) -> Result<Weather> {
        NaverClient::search_weather(self, location_code).await
    }

    async fn set_weather_source(&self, location_code: &str, source: WeatherSource) -> Result<()> {
        NaverClient::set_weather_source(self, location_code, source).await
    }
}

/// Build a client honouring the endpoint overrides and the saved weather
/// source in the config.
pub fn client_from_config(config: &Config) -> anyhow::Result<NaverClient> {
    let client = NaverClient::new().with_endpoints(config.endpoints());

    if config.weather_source.is_none() {
        return Ok(client);
    }
    Ok(client.with_page_source(config.weather_source_id()?))
}
