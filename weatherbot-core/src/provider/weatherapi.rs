use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::WeatherApiConfig,
    error::WeatherError,
    model::{WeatherRequest, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, http: Client) -> Self {
        Self { api_key: api_key.filter(|k| !k.is_empty()), base_url: base_url.into(), http }
    }

    pub fn from_config(config: &WeatherApiConfig) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self::new(config.api_key.clone(), config.base_url.clone(), http))
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaErrorResponse {
    error: WaErrorBody,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    #[serde(default)]
    current: WeatherSnapshot,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn current(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        debug!(location = %request.location, "requesting current conditions from WeatherAPI");

        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", api_key), ("q", request.location.as_str()), ("aqi", "no")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        parse_current(status, &body)
    }
}

/// WeatherAPI reports bad keys and unknown locations as an `error` object,
/// usually alongside a 4xx status.
fn parse_current(status: StatusCode, body: &str) -> Result<WeatherSnapshot, WeatherError> {
    if let Ok(err) = serde_json::from_str::<WaErrorResponse>(body) {
        return Err(WeatherError::Api {
            message: err.error.message.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    if !status.is_success() {
        return Err(WeatherError::Status { status: status.as_u16(), body: truncate_body(body) });
    }

    let parsed: WaResponse = serde_json::from_str(body)?;
    Ok(parsed.current)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
