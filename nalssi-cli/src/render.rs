//! Plain-text rendering of a weather snapshot.

use std::fmt;

use nalssi_core::Weather;

/// Human-readable report for one location.
pub struct Report<'a> {
    pub name: &'a str,
    pub weather: &'a Weather,
    /// Hourly rows to show; 0 hides the section.
    pub hours: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.weather;

        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}  {} (feels like {})", w.condition, w.temperature, w.feel_temperature)?;
        writeln!(
            f,
            "  humidity {}%  wind {} {} m/s  rain {} mm",
            w.humidity, w.wind_direction, w.wind_speed, w.rain_amount
        )?;
        writeln!(f, "  dust {}  fine dust {}", w.dust, w.fine_dust)?;

        if !w.forecasts.is_empty() && self.hours > 0 {
            writeln!(f, "\nHourly")?;
            for h in w.forecasts.iter().take(self.hours) {
                writeln!(
                    f,
                    "  {}  {:<8} {:>7}  rain {:>3}% {:>4} mm  humidity {:>3}%  {} {} m/s",
                    h.time.format("%m-%d %H:00"),
                    h.condition,
                    h.temperature.to_string(),
                    h.rain_percent_chance,
                    h.rain_amount,
                    h.humidity,
                    h.wind_direction,
                    h.wind_speed
                )?;
            }
        }

        if !w.weekly_forecast.is_empty() {
            writeln!(f, "\nWeekly")?;
            for day in &w.weekly_forecast {
                writeln!(
                    f,
                    "  {}  am {} {}% {}  |  pm {} {}% {}",
                    day.date().format("%m-%d %a"),
                    day.morning.condition,
                    day.morning.rain_chance,
                    day.morning.temperature,
                    day.afternoon.condition,
                    day.afternoon.rain_chance,
                    day.afternoon.temperature
                )?;
            }
        }

        Ok(())
    }
}
