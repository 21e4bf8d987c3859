use thiserror::Error;

/// Failure to obtain current conditions from the weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("WeatherAPI key not set.")]
    MissingApiKey,

    /// The provider answered with an `{"error": {...}}` payload.
    #[error("WeatherAPI error: {message}")]
    Api { message: String },

    #[error("WeatherAPI request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid WeatherAPI response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    /// Text shown to the chat user when a fetch fails.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::MissingApiKey | WeatherError::Api { .. } => self.to_string(),
            other => format!("Failed to fetch weather: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_and_key_errors_are_shown_verbatim() {
        assert_eq!(WeatherError::MissingApiKey.user_message(), "WeatherAPI key not set.");

        let err = WeatherError::Api { message: "No matching location found.".into() };
        assert_eq!(err.user_message(), "WeatherAPI error: No matching location found.");
    }

    #[test]
    fn other_errors_are_prefixed() {
        let err = WeatherError::Status { status: 502, body: "Bad Gateway".into() };
        assert_eq!(
            err.user_message(),
            "Failed to fetch weather: WeatherAPI request failed with status 502: Bad Gateway"
        );

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let msg = WeatherError::from(decode).user_message();
        assert!(msg.starts_with("Failed to fetch weather: invalid WeatherAPI response"));
    }
}
