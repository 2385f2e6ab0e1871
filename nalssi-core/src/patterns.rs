//! Regular expressions used to pull values out of page text.
//!
//! Every extractor returns `Option` and logs when the text does not match, so
//! callers decide whether a miss is worth a sentinel or an error.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).expect("valid regex"));
    };
}

pattern!(TEMPERATURE, r"(-?\d+(?:\.\d+)?)\s*(?:°|도)");
pattern!(PERCENT, r"(\d+(?:\.\d+)?)\s*%");
pattern!(SPEED, r"(\d+(?:\.\d+)?)\s*m/s");
pattern!(RAIN, r"(\d+(?:\.\d+)?)\s*mm");
pattern!(NUMBER, r"\d+(?:\.\d+)?");
pattern!(WIND_DIRECTION, r"([동서남북]+풍)");
pattern!(COOKIE, r#"[A-Z\d_]+="?[A-Za-z\d]*=?"?"#);
pattern!(DOMESTIC_MARKER, r"isDomestic\s*=\s*(true|false)\s*;");
pattern!(WEATHER_SUMMARY_MARKER, r"weatherSummary\s*=\s*");
pattern!(HOURLY_MARKER, r"(?:hourlyFcastListJson|townFcastListJson)\s*=\s*");
pattern!(MONTH_DAY, r"(\d{1,2})\.(\d{1,2})");
pattern!(DATE_TIME, r"^(\d{4})(\d{2})(\d{2})(\d{2})");

/// Marks the wind direction as unknown.
pub const UNKNOWN_TEXT: &str = "??";
/// Marks dust levels as unknown.
pub const UNKNOWN_DUST: &str = "?";
/// Marks a numeric reading as unknown.
pub const UNKNOWN_NUMBER: f64 = -1.0;

fn capture_f64(re: &Regex, text: &str, what: &str) -> Option<f64> {
    let value = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok());

    if value.is_none() {
        tracing::warn!(text, "no match for {what}");
    }
    value
}

/// `"21°"`, `"영상 3도"` → degrees.
pub fn temperature(text: &str) -> Option<f64> {
    capture_f64(&TEMPERATURE, text, "temperature")
}

/// `"습도 60%"` → 60.
pub fn percent(text: &str) -> Option<f64> {
    capture_f64(&PERCENT, text, "percentage")
}

/// `"2 m/s"` → 2.
pub fn speed(text: &str) -> Option<f64> {
    capture_f64(&SPEED, text, "wind speed")
}

/// `"0.5mm"` → 0.5.
pub fn rain_mm(text: &str) -> Option<f64> {
    capture_f64(&RAIN, text, "rain amount")
}

/// `"북서풍 2m/s"` → `"북서풍"`.
pub fn wind_direction(text: &str) -> Option<String> {
    let value = WIND_DIRECTION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    if value.is_none() {
        tracing::warn!(text, "no match for wind direction");
    }
    value
}

/// Upper bound of a rain amount that may be given as a range, `"3~5"` → 5.
pub fn rain_range_upper(raw: &str) -> Option<f64> {
    let tail = match raw.rfind('~') {
        Some(idx) => &raw[idx + '~'.len_utf8()..],
        None => raw,
    };
    let tail = tail.trim();

    tail.parse::<f64>()
        .ok()
        .or_else(|| NUMBER.find(tail).and_then(|m| m.as_str().parse().ok()))
}

/// Rain probability, where `"-"` means the provider has no figure.
pub fn rain_probability(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw == "-" || raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok()
}

/// `"10.16."` → (10, 16).
pub fn month_day(text: &str) -> Option<(u32, u32)> {
    let caps = MONTH_DAY.captures(text)?;
    let month = caps.get(1)?.as_str().parse().ok()?;
    let day = caps.get(2)?.as_str().parse().ok()?;
    Some((month, day))
}

/// `YYYYMMDDHH` with a calendar (1-based) month.
pub fn date_time(token: &str) -> Option<NaiveDateTime> {
    let caps = DATE_TIME.captures(token.trim())?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    let hour = caps.get(4)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}

/// `NAME="value"` tokens from a `set-cookie` header value, in header order.
pub fn cookie_tokens(header: &str) -> Vec<&str> {
    COOKIE.find_iter(header).map(|m| m.as_str()).collect()
}

/// Value of the last `isDomestic = ...;` assignment in a script.
pub fn domestic_flag(script: &str) -> Option<bool> {
    DOMESTIC_MARKER
        .captures_iter(script)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str() == "true")
}

/// Script text right after `weatherSummary = `.
pub fn after_weather_summary(script: &str) -> Option<&str> {
    WEATHER_SUMMARY_MARKER.find(script).map(|m| &script[m.end()..])
}

/// Script text right after `hourlyFcastListJson = ` (or the older `townFcastListJson`).
pub fn after_hourly_list(script: &str) -> Option<&str> {
    HOURLY_MARKER.find(script).map(|m| &script[m.end()..])
}
