use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Endpoints, Location, WeatherSource};

/// Optional endpoint overrides, mostly for pointing at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EndpointsConfig {
    /// Serves both `/ac` and `/today/...` from one host.
    pub base_url: Option<String>,
    pub autocomplete_url: Option<String>,
    pub weather_base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream source last chosen, e.g. "kma" or "accuweather".
    pub weather_source: Option<String>,

    /// Last location picked by the user.
    ///
    /// Example TOML:
    /// [last_location]
    /// name = "서울특별시 용산구 이태원동"
    /// code = "09170130"
    pub last_location: Option<Location>,

    pub endpoints: Option<EndpointsConfig>,
}

impl Config {
    /// The saved location, or a hint on how to pick one.
    pub fn last_location_or_hint(&self) -> Result<&Location> {
        self.last_location.as_ref().ok_or_else(|| {
            anyhow!(
                "No location selected.\n\
                 Hint: run `nalssi pick <name>` (e.g. `nalssi pick 이태원`) or pass --code."
            )
        })
    }

    pub fn set_last_location(&mut self, location: Location) {
        self.last_location = Some(location);
    }

    /// Saved weather source, [`WeatherSource::Kma`] when none was chosen.
    pub fn weather_source_id(&self) -> Result<WeatherSource> {
        match self.weather_source.as_deref() {
            Some(s) => WeatherSource::try_from(s),
            None => Ok(WeatherSource::default()),
        }
    }

    /// Store weather source as string.
    pub fn set_weather_source(&mut self, source: WeatherSource) {
        self.weather_source = Some(source.as_str().to_lowercase());
    }

    /// Endpoints with overrides applied; a specific URL beats `base_url`.
    pub fn endpoints(&self) -> Endpoints {
        let Some(overrides) = &self.endpoints else {
            return Endpoints::default();
        };

        let mut endpoints = match &overrides.base_url {
            Some(base) => Endpoints::from_base(base),
            None => Endpoints::default(),
        };
        if let Some(url) = &overrides.autocomplete_url {
            endpoints.autocomplete_url = url.clone();
        }
        if let Some(url) = &overrides.weather_base_url {
            endpoints.weather_base_url = url.clone();
        }
        endpoints
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nalssi", "nalssi")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itaewon() -> Location {
        Location { name: "서울특별시 용산구 이태원동".into(), code: "09170130".into() }
    }

    #[test]
    fn last_location_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.last_location_or_hint().unwrap_err();

        assert!(err.to_string().contains("No location selected"));
    }

    #[test]
    fn set_last_location_replaces_previous() {
        let mut cfg = Config::default();
        cfg.set_last_location(Location { name: "봉천동".into(), code: "09620101".into() });
        cfg.set_last_location(itaewon());

        let loc = cfg.last_location_or_hint().expect("location must exist");
        assert_eq!(loc.code, "09170130");
    }

    #[test]
    fn weather_source_defaults_and_roundtrips() {
        let mut cfg = Config::default();
        assert_eq!(cfg.weather_source_id().expect("default"), WeatherSource::Kma);

        cfg.set_weather_source(WeatherSource::Twc);
        assert_eq!(cfg.weather_source.as_deref(), Some("twc"));
        assert_eq!(cfg.weather_source_id().expect("saved"), WeatherSource::Twc);

        cfg.weather_source = Some("bogus".into());
        assert!(cfg.weather_source_id().is_err());
    }

    #[test]
    fn specific_endpoint_beats_base_url() {
        let cfg = Config {
            endpoints: Some(EndpointsConfig {
                base_url: Some("http://localhost:1234".into()),
                autocomplete_url: Some("http://ac.localhost/ac".into()),
                weather_base_url: None,
            }),
            ..Default::default()
        };

        let endpoints = cfg.endpoints();
        assert_eq!(endpoints.autocomplete_url, "http://ac.localhost/ac");
        assert_eq!(endpoints.weather_base_url, "http://localhost:1234");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_last_location(itaewon());
        cfg.set_weather_source(WeatherSource::AccuWeather);
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.last_location, Some(itaewon()));
        assert_eq!(loaded.weather_source_id().expect("source"), WeatherSource::AccuWeather);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("default");

        assert!(cfg.last_location.is_none());
        assert!(cfg.endpoints.is_none());
    }
}
