use std::fmt;

/// A metric of a [`WeatherSnapshot`](crate::WeatherSnapshot), named by its
/// WeatherAPI field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherField {
    Humidity,
    WindKph,
    WindMph,
    Uv,
    PressureMb,
    Cloud,
    FeelslikeC,
    GustKph,
    PrecipMm,
    TempC,
}

impl WeatherField {
    pub fn key(&self) -> &'static str {
        match self {
            WeatherField::Humidity => "humidity",
            WeatherField::WindKph => "wind_kph",
            WeatherField::WindMph => "wind_mph",
            WeatherField::Uv => "uv",
            WeatherField::PressureMb => "pressure_mb",
            WeatherField::Cloud => "cloud",
            WeatherField::FeelslikeC => "feelslike_c",
            WeatherField::GustKph => "gust_kph",
            WeatherField::PrecipMm => "precip_mm",
            WeatherField::TempC => "temp_c",
        }
    }

    /// WeatherAPI sends these as integers rather than floats.
    pub fn is_integral(&self) -> bool {
        matches!(self, WeatherField::Humidity | WeatherField::Cloud)
    }
}

impl fmt::Display for WeatherField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Keyword -> (field, unit). Order matters: the first keyword found in the
/// request wins, so "wind" shadows "wind_mph" and "wind_kph".
const DETAIL_TABLE: &[(&str, WeatherField, &str)] = &[
    ("humidity", WeatherField::Humidity, "%"),
    ("wind", WeatherField::WindKph, "kph"),
    ("wind_mph", WeatherField::WindMph, "mph"),
    ("wind_kph", WeatherField::WindKph, "kph"),
    ("uv", WeatherField::Uv, ""),
    ("pressure", WeatherField::PressureMb, "mb"),
    ("cloud", WeatherField::Cloud, "%"),
    ("feelslike", WeatherField::FeelslikeC, "°C"),
    ("gust", WeatherField::GustKph, "kph"),
    ("precipitation", WeatherField::PrecipMm, "mm"),
    ("temperature", WeatherField::TempC, "°C"),
];

/// Human-readable list of details users can ask for.
pub const SUPPORTED_DETAILS: &str =
    "humidity, wind, UV, pressure, cloud, feelslike, gust, precipitation, temperature";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDetail {
    pub field: WeatherField,
    pub unit: &'static str,
}

/// Map a free-text detail request to the field it asks for.
pub fn resolve(requested: &str) -> Option<ResolvedDetail> {
    let requested = requested.to_lowercase();

    DETAIL_TABLE
        .iter()
        .find(|(keyword, _, _)| requested.contains(keyword))
        .map(|&(_, field, unit)| ResolvedDetail { field, unit })
}
