use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A place the provider can report weather for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, e.g. "서울특별시 용산구 이태원동".
    pub name: String,
    /// Opaque provider code, e.g. "09170130".
    pub code: String,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub degrees: f64,
    pub scale: Scale,
}

impl Temperature {
    pub fn celsius(degrees: f64) -> Self {
        Self { degrees, scale: Scale::Celsius }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.scale {
            Scale::Celsius => "°C",
            Scale::Fahrenheit => "°F",
        };
        write!(f, "{}{unit}", self.degrees)
    }
}

/// One hourly forecast point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub time: NaiveDateTime,
    pub condition: String,
    pub temperature: Temperature,
    /// 0..=100
    pub rain_percent_chance: f64,
    /// Millimetres.
    pub rain_amount: f64,
    pub humidity: f64,
    pub wind_direction: String,
    /// Metres per second.
    pub wind_speed: f64,
}

/// Half of a day in the weekly forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: String,
    pub rain_chance: f64,
    pub temperature: Temperature,
}

/// Morning and afternoon of the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyForecast {
    pub morning: DailyForecast,
    pub afternoon: DailyForecast,
}

impl WeeklyForecast {
    pub fn date(&self) -> NaiveDate {
        self.morning.date
    }
}

/// Snapshot of the "now" section of a weather page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Temperature,
    pub feel_temperature: Temperature,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub condition: String,
    pub dust_level: String,
    pub fine_dust_level: String,
    pub rain_amount_now: f64,
}

/// Everything scraped from one weather page fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature: Temperature,
    pub feel_temperature: Temperature,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub dust: String,
    pub fine_dust: String,
    pub condition: String,
    pub rain_amount: f64,
    pub forecasts: Vec<Forecast>,
    /// Empty for locations whose page has no weekly section.
    pub weekly_forecast: Vec<WeeklyForecast>,
}

impl Weather {
    pub fn new(
        current: CurrentConditions,
        forecasts: Vec<Forecast>,
        weekly_forecast: Vec<WeeklyForecast>,
    ) -> Self {
        Self {
            temperature: current.temperature,
            feel_temperature: current.feel_temperature,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            wind_direction: current.wind_direction,
            dust: current.dust_level,
            fine_dust: current.fine_dust_level,
            condition: current.condition,
            rain_amount: current.rain_amount_now,
            forecasts,
            weekly_forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_display_includes_unit() {
        assert_eq!(Temperature::celsius(21.0).to_string(), "21°C");
        let f = Temperature { degrees: 70.5, scale: Scale::Fahrenheit };
        assert_eq!(f.to_string(), "70.5°F");
    }

    #[test]
    fn location_serializes_as_plain_record() {
        let loc = Location { name: "서울특별시 관악구 봉천동".into(), code: "09620101".into() };
        let json = serde_json::to_value(&loc).expect("serialize");

        assert_eq!(json["name"], "서울특별시 관악구 봉천동");
        assert_eq!(json["code"], "09620101");
    }
}
