use crate::{
    Config, WeatherRequest, WeatherSnapshot, error::WeatherError,
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Whether credentials are present; a configured provider can still fail.
    fn is_configured(&self) -> bool;

    async fn current(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the WeatherAPI provider from config.
///
/// A missing API key is not an error here: the provider reports it per
/// request so the chatbot can tell the user.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = WeatherApiProvider::from_config(&config.weatherapi)?;
    Ok(Arc::new(provider))
}
