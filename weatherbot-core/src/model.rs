use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detail::WeatherField;

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub location: String,
}

impl WeatherRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self { location: location.into() }
    }
}

/// Current conditions for one location, every metric optional.
///
/// Serializes in WeatherAPI's `current` object shape, which is also what the
/// `weather_data` slot holds between turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WaCurrent", into = "WaCurrent")]
pub struct WeatherSnapshot {
    pub temperature_celsius: Option<f64>,
    pub condition_text: Option<String>,
    pub humidity_percent: Option<f64>,
    pub wind_kph: Option<f64>,
    pub wind_mph: Option<f64>,
    pub uv_index: Option<f64>,
    pub pressure_mb: Option<f64>,
    pub cloud_percent: Option<f64>,
    pub feelslike_celsius: Option<f64>,
    pub gust_kph: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    /// Condition text, or an empty string when the provider sent none.
    pub fn condition(&self) -> &str {
        self.condition_text.as_deref().unwrap_or("")
    }

    pub fn value(&self, field: WeatherField) -> Option<f64> {
        match field {
            WeatherField::Humidity => self.humidity_percent,
            WeatherField::WindKph => self.wind_kph,
            WeatherField::WindMph => self.wind_mph,
            WeatherField::Uv => self.uv_index,
            WeatherField::PressureMb => self.pressure_mb,
            WeatherField::Cloud => self.cloud_percent,
            WeatherField::FeelslikeC => self.feelslike_celsius,
            WeatherField::GustKph => self.gust_kph,
            WeatherField::PrecipMm => self.precipitation_mm,
            WeatherField::TempC => self.temperature_celsius,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WaCondition {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WaCurrent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temp_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<WaCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wind_kph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wind_mph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pressure_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cloud: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feelslike_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gust_kph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precip_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated_epoch: Option<i64>,
}

impl From<WaCurrent> for WeatherSnapshot {
    fn from(raw: WaCurrent) -> Self {
        Self {
            temperature_celsius: raw.temp_c,
            condition_text: raw.condition.and_then(|c| c.text),
            humidity_percent: raw.humidity,
            wind_kph: raw.wind_kph,
            wind_mph: raw.wind_mph,
            uv_index: raw.uv,
            pressure_mb: raw.pressure_mb,
            cloud_percent: raw.cloud,
            feelslike_celsius: raw.feelslike_c,
            gust_kph: raw.gust_kph,
            precipitation_mm: raw.precip_mm,
            observed_at: raw.last_updated_epoch.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        }
    }
}

impl From<WeatherSnapshot> for WaCurrent {
    fn from(snapshot: WeatherSnapshot) -> Self {
        Self {
            temp_c: snapshot.temperature_celsius,
            condition: snapshot.condition_text.map(|text| WaCondition { text: Some(text) }),
            humidity: snapshot.humidity_percent,
            wind_kph: snapshot.wind_kph,
            wind_mph: snapshot.wind_mph,
            uv: snapshot.uv_index,
            pressure_mb: snapshot.pressure_mb,
            cloud: snapshot.cloud_percent,
            feelslike_c: snapshot.feelslike_celsius,
            gust_kph: snapshot.gust_kph,
            precip_mm: snapshot.precipitation_mm,
            last_updated_epoch: snapshot.observed_at.map(|t| t.timestamp()),
        }
    }
}
