use std::{convert::TryFrom, str::FromStr};

use serde::{Deserialize, Serialize};

/// Upstream forecaster whose data the weather page reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherSource {
    /// Korea Meteorological Administration.
    #[default]
    Kma,
    AccuWeather,
    /// The Weather Channel.
    Twc,
}

impl WeatherSource {
    /// Value of the `cpName` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::Kma => "KMA",
            WeatherSource::AccuWeather => "ACCUWEATHER",
            WeatherSource::Twc => "TWC",
        }
    }

    pub const fn all() -> &'static [WeatherSource] {
        &[WeatherSource::Kma, WeatherSource::AccuWeather, WeatherSource::Twc]
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WeatherSource {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "kma" => Ok(WeatherSource::Kma),
            "accuweather" => Ok(WeatherSource::AccuWeather),
            "twc" => Ok(WeatherSource::Twc),
            _ => Err(anyhow::anyhow!(
                "Unknown weather source '{value}'. Supported sources: kma, accuweather, twc."
            )),
        }
    }
}

impl FromStr for WeatherSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherSource::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_as_str_roundtrip() {
        for source in WeatherSource::all() {
            let s = source.as_str();
            let parsed = WeatherSource::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*source, parsed);
        }
    }

    #[test]
    fn parsing_ignores_case() {
        let parsed: WeatherSource = "AccuWeather".parse().expect("known source");
        assert_eq!(parsed, WeatherSource::AccuWeather);
    }

    #[test]
    fn unknown_source_error() {
        let err = WeatherSource::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown weather source"));
    }

    #[test]
    fn default_is_kma() {
        assert_eq!(WeatherSource::default(), WeatherSource::Kma);
    }
}
