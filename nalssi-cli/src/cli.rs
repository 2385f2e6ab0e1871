use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use nalssi_core::{
    Config, Location, LocationService, NalssiError, Weather, WeatherService, WeatherSource,
    client_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nalssi", version, about = "Naver weather from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List locations matching a name.
    Search {
        /// Location name, e.g. "이태원".
        query: String,
    },

    /// Choose a location interactively and remember it.
    Pick {
        /// Location name, e.g. "이태원".
        query: String,
    },

    /// Show weather for a location code, or for the remembered location.
    Show {
        /// Provider location code; defaults to the picked location.
        #[arg(long)]
        code: Option<String>,

        /// Print the full snapshot as JSON.
        #[arg(long)]
        json: bool,

        /// Number of hourly forecasts to print.
        #[arg(long, default_value_t = 12)]
        hours: usize,
    },

    /// Choose which upstream forecaster the weather page follows.
    Source {
        /// One of: kma, accuweather, twc.
        source: WeatherSource,

        /// Provider location code; defaults to the picked location.
        #[arg(long)]
        code: Option<String>,
    },
}

const UNAVAILABLE: &str = "Weather data unavailable, choose a different location.";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        let client = client_from_config(&config)?;

        match self.command {
            Command::Search { query } => {
                let locations = search(&client, &query).await?;
                if locations.is_empty() {
                    println!("No locations found for '{query}'.");
                }
                for loc in &locations {
                    println!("{}\t{}", loc.code, loc.name);
                }
            }
            Command::Pick { query } => {
                let locations = search(&client, &query).await?;
                if locations.is_empty() {
                    bail!("No locations found for '{query}'.");
                }

                let picked = inquire::Select::new("Location:", locations)
                    .prompt()
                    .context("Location selection was cancelled")?;

                println!("Selected {} ({})", picked.name, picked.code);
                config.set_last_location(picked);
                config.save()?;
            }
            Command::Show { code, json, hours } => {
                let code = resolve_code(&config, code)?;
                let weather = fetch(&client, &code).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&weather)?);
                } else {
                    let name = config
                        .last_location
                        .as_ref()
                        .filter(|loc| loc.code == code)
                        .map(|loc| loc.name.as_str())
                        .unwrap_or(code.as_str());
                    print!("{}", render::Report { name, weather: &weather, hours });
                }
            }
            Command::Source { source, code } => {
                let code = resolve_code(&config, code)?;
                client
                    .set_weather_source(&code, source)
                    .await
                    .with_context(|| format!("Failed to switch weather source to {source}"))?;

                config.set_weather_source(source);
                config.save()?;
                println!("Weather source for {code} set to {source}.");
            }
        }

        Ok(())
    }
}

fn resolve_code(config: &Config, code: Option<String>) -> anyhow::Result<String> {
    match code {
        Some(code) => Ok(code),
        None => Ok(config.last_location_or_hint()?.code.clone()),
    }
}

async fn search(service: &dyn LocationService, query: &str) -> anyhow::Result<Vec<Location>> {
    service
        .search_location(query)
        .await
        .with_context(|| format!("Failed to search locations for '{query}'"))
}

async fn fetch(service: &dyn WeatherService, code: &str) -> anyhow::Result<Weather> {
    match service.search_weather(code).await {
        Ok(weather) => Ok(weather),
        Err(err) if err.is_data_unavailable() => {
            Err(anyhow::Error::new(err).context(UNAVAILABLE))
        }
        Err(err @ NalssiError::InvalidQuery) => Err(err.into()),
        Err(err) => Err(anyhow::Error::new(err).context(format!("Failed to load weather for {code}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_show_defaults() {
        let cli = Cli::try_parse_from(["nalssi", "show"]).expect("valid args");
        match cli.command {
            Command::Show { code, json, hours } => {
                assert!(code.is_none());
                assert!(!json);
                assert_eq!(hours, 12);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_source_names() {
        let cli = Cli::try_parse_from(["nalssi", "source", "accuweather", "--code", "09170130"])
            .expect("valid args");
        match cli.command {
            Command::Source { source, code } => {
                assert_eq!(source, WeatherSource::AccuWeather);
                assert_eq!(code.as_deref(), Some("09170130"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["nalssi", "source", "bogus"]).is_err());
    }

    #[test]
    fn resolve_code_prefers_explicit_code() {
        let cfg = Config::default();
        assert_eq!(resolve_code(&cfg, Some("WDUSA15235".into())).expect("code"), "WDUSA15235");
        assert!(resolve_code(&cfg, None).is_err());
    }
}
