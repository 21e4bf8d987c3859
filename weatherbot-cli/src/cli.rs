use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::warn;
use weatherbot_core::{
    ActionRegistry, Config, OutfitAdvice, WeatherRequest, WeatherSnapshot, config::API_KEY_ENV,
    detail, provider_from_config,
};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "WeatherBot action server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the chatbot action server.
    Serve {
        /// Address to bind; defaults to the configured host.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; defaults to the configured port.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Show current weather for a location.
    Show {
        /// Location name, e.g. "London".
        location: String,
    },

    /// Print outfit advice for a temperature and condition.
    Outfit {
        /// Temperature in Celsius.
        #[arg(allow_negative_numbers = true)]
        temperature: f64,

        /// Condition text, e.g. "Light rain".
        condition: Vec<String>,
    },

    /// Print which weather field a detail request maps to.
    Detail {
        /// Free-text request, e.g. "wind speed".
        #[arg(required = true)]
        request: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { host, port } => {
                let mut config = Config::load_with_env()?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                if !config.is_configured() {
                    warn!(
                        "no WeatherAPI key configured; set {API_KEY_ENV} or run `weatherbot configure`"
                    );
                }

                let provider = provider_from_config(&config)?;
                let registry = Arc::new(ActionRegistry::weather(provider));
                server::serve(&config.server_addr(), registry).await?;
            }
            Command::Configure => configure()?,
            Command::Show { location } => {
                let config = Config::load_with_env()?;
                let provider = provider_from_config(&config)?;
                let snapshot = provider
                    .current(&WeatherRequest::new(location.as_str()))
                    .await
                    .with_context(|| format!("Failed to fetch weather for {location}"))?;

                print!("{}", render_snapshot(&location, &snapshot));
            }
            Command::Outfit { temperature, condition } => {
                println!("{}", OutfitAdvice::suggest(temperature, &condition.join(" ")));
            }
            Command::Detail { request } => {
                let request = request.join(" ");
                match detail::resolve(&request) {
                    Some(d) if d.unit.is_empty() => println!("{}", d.field),
                    Some(d) => println!("{} ({})", d.field, d.unit),
                    None => println!("no match for '{request}'"),
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("WeatherAPI.com key:")
        .without_confirmation()
        .with_help_message("Get one at https://www.weatherapi.com/my/")
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn render_snapshot(location: &str, snapshot: &WeatherSnapshot) -> String {
    let fmt = |v: Option<f64>, unit: &str| match v {
        Some(v) => format!("{v}{unit}"),
        None => "n/a".to_string(),
    };

    let mut out = format!("Weather in {location}\n");
    out.push_str(&format!("  Condition:   {}\n", snapshot.condition()));
    out.push_str(&format!(
        "  Temperature: {} (feels like {})\n",
        fmt(snapshot.temperature_celsius, "°C"),
        fmt(snapshot.feelslike_celsius, "°C")
    ));
    out.push_str(&format!("  Humidity:    {}\n", fmt(snapshot.humidity_percent, "%")));
    out.push_str(&format!("  Wind:        {}\n", fmt(snapshot.wind_kph, " kph")));
    if let Some(observed) = snapshot.observed_at {
        out.push_str(&format!(
            "  Observed:    {}\n",
            observed.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }
    if let Some(temp) = snapshot.temperature_celsius {
        out.push_str(&format!("  Outfit:      {}\n", OutfitAdvice::suggest(temp, snapshot.condition())));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_outfit_temperature() {
        let cli = Cli::try_parse_from(["weatherbot", "outfit", "-5", "light", "snow"]).unwrap();
        match cli.command {
            Command::Outfit { temperature, condition } => {
                assert_eq!(temperature, -5.0);
                assert_eq!(condition.join(" "), "light snow");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn detail_requires_a_request() {
        assert!(Cli::try_parse_from(["weatherbot", "detail"]).is_err());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["weatherbot", "serve", "--port", "5056"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(5056));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn render_includes_outfit_and_missing_values() {
        let snapshot = WeatherSnapshot {
            temperature_celsius: Some(27.0),
            condition_text: Some("Sunny".into()),
            humidity_percent: Some(30.0),
            ..Default::default()
        };

        let text = render_snapshot("Athens", &snapshot);
        assert!(text.starts_with("Weather in Athens\n"));
        assert!(text.contains("Temperature: 27°C (feels like n/a)"));
        assert!(text.contains("Wind:        n/a"));
        assert!(text.contains(OutfitAdvice::Hot.as_str()));
        assert!(!text.contains("Observed"));
    }
}
