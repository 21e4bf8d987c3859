//! Core library for the WeatherBot action server.
//!
//! This crate defines:
//! - Outfit advice and weather-detail lookup tables
//! - Configuration & credentials handling
//! - The WeatherAPI.com provider
//! - The chatbot webhook protocol and the weather actions built on it
//!
//! It is used by `weatherbot-cli`, but can also be reused by other binaries or services.

pub mod actions;
pub mod advice;
pub mod config;
pub mod detail;
pub mod error;
pub mod model;
pub mod protocol;
pub mod provider;

pub use actions::{Action, ActionError, ActionRegistry};
pub use advice::OutfitAdvice;
pub use config::{Config, ServerConfig, WeatherApiConfig};
pub use detail::{ResolvedDetail, WeatherField};
pub use error::WeatherError;
pub use model::{WeatherRequest, WeatherSnapshot};
pub use protocol::{ActionCall, ActionErrorBody, ActionResponse};
pub use provider::{WeatherProvider, provider_from_config};
