use chrono::Local;
use reqwest::{Client, header::COOKIE};
use serde::{Deserialize, Serialize};

use crate::{
    Location, Weather, WeatherSource,
    error::{NalssiError, Result, truncate_body},
    extract, location,
    session::Session,
};

pub const DEFAULT_AUTOCOMPLETE_URL: &str = "https://ac.weather.naver.com/ac";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://weather.naver.com";

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub autocomplete_url: String,
    pub weather_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            autocomplete_url: DEFAULT_AUTOCOMPLETE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Both endpoints on one host, as a local mock server would serve them.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            autocomplete_url: format!("{base}/ac"),
            weather_base_url: base.to_string(),
        }
    }

    fn base(&self) -> &str {
        self.weather_base_url.trim_end_matches('/')
    }
}

/// Scraping client for the Naver weather site.
///
/// Keeps its own session cookie, so use one client per logical session.
#[derive(Debug)]
pub struct NaverClient {
    http: Client,
    endpoints: Endpoints,
    page_source: WeatherSource,
    session: Session,
}

impl Default for NaverClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NaverClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            endpoints: Endpoints::default(),
            page_source: WeatherSource::AccuWeather,
            session: Session::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Value sent as `cpName` when fetching the weather page.
    pub fn with_page_source(mut self, source: WeatherSource) -> Self {
        self.page_source = source;
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn page_source(&self) -> WeatherSource {
        self.page_source
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn search_location(&self, query: &str) -> Result<Vec<Location>> {
        location::search_location(&self.http, &self.endpoints.autocomplete_url, query).await
    }

    /// Fetch and parse the weather page for a location code.
    pub async fn search_weather(&self, location_code: &str) -> Result<Weather> {
        let code = location_code.trim();
        if code.is_empty() {
            return Err(NalssiError::InvalidQuery);
        }

        let url = format!("{}/today/{code}", self.endpoints.base());
        tracing::debug!(%url, source = %self.page_source, "fetching weather page");

        let mut req = self.http.get(&url).query(&[("cpName", self.page_source.as_str())]);
        let cookie = self.session.current_cookie();
        if !cookie.is_empty() {
            req = req.header(COOKIE, cookie);
        }

        let res = req
            .send()
            .await
            .map_err(|e| NalssiError::fetch("Failed to send weather page request", e))?;

        self.session.update_from_headers(res.headers());

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| NalssiError::fetch("Failed to read weather page body", e))?;

        if !status.is_success() {
            return Err(NalssiError::UnexpectedStatus {
                url,
                status,
                body: truncate_body(&body),
            });
        }

        extract::parse_weather_page(&body, Local::now().date_naive())
    }

    /// Ask the site to follow `source` for this location on later page loads.
    pub async fn set_weather_source(&self, location_code: &str, source: WeatherSource) -> Result<()> {
        let url = format!("{}/today/api/follow", self.endpoints.base());

        let mut req = self
            .http
            .post(&url)
            .form(&[("regionCode", location_code), ("cpName", source.as_str())]);
        let cookie = self.session.current_cookie();
        if !cookie.is_empty() {
            req = req.header(COOKIE, cookie);
        }

        let res = req
            .send()
            .await
            .map_err(|e| NalssiError::fetch("Failed to send weather source request", e))?;

        let status = res.status();
        if status.is_success() {
            tracing::info!(%status, location_code, %source, "weather source updated");
        } else {
            tracing::warn!(%status, location_code, %source, "weather source update rejected");
        }

        Ok(())
    }
}
