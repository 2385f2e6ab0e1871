use serde::Deserialize;

use super::{RawValue, leading_json, snippet};
use crate::{
    Forecast, Temperature,
    document::Document,
    patterns::{self, UNKNOWN_NUMBER, UNKNOWN_TEXT},
};

/// One entry of the embedded `hourlyFcastListJson` array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHourly {
    apl_ymdt: RawValue,
    rain_prob: Option<RawValue>,
    rain_amt: Option<RawValue>,
    humd: Option<RawValue>,
    wind_drctn_name: Option<String>,
    wind_spd: Option<RawValue>,
    tmpr: Option<RawValue>,
    wetr_txt: Option<String>,
    /// Condition text field used by newer payloads.
    wetr_sky_txt: Option<String>,
}

/// Hourly forecasts embedded in the page's last inline script.
///
/// Returns an empty list when the payload is missing or unreadable,
/// including when any record carries an unreadable time.
pub fn extract_hourly(doc: &Document) -> Vec<Forecast> {
    match doc.last_inline_script() {
        Some(script) => hourly_from_script(&script),
        None => {
            tracing::warn!("no inline script, skipping hourly forecast");
            Vec::new()
        }
    }
}

pub(crate) fn hourly_from_script(script: &str) -> Vec<Forecast> {
    let Some(payload) = patterns::after_hourly_list(script) else {
        tracing::warn!(script = snippet(script), "hourly forecast list not found");
        return Vec::new();
    };

    let raw: Vec<RawHourly> = match leading_json(payload) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(script = snippet(payload), "failed to parse hourly forecast list: {err}");
            return Vec::new();
        }
    };

    // A single dropped record would leave a gap in the hourly sequence.
    match raw.into_iter().map(to_forecast).collect::<Option<Vec<_>>>() {
        Some(forecasts) => forecasts,
        None => {
            tracing::warn!("discarding hourly forecast list with an unreadable time");
            Vec::new()
        }
    }
}

fn to_forecast(raw: RawHourly) -> Option<Forecast> {
    let token = raw.apl_ymdt.to_text();
    let Some(time) = patterns::date_time(&token) else {
        tracing::warn!(token = %token, "hourly forecast with unreadable time");
        return None;
    };

    let rain_percent_chance = match &raw.rain_prob {
        Some(RawValue::Text(s)) => patterns::rain_probability(s),
        Some(n) => n.as_f64(),
        None => Some(0.0),
    }
    .unwrap_or_else(|| {
        tracing::warn!(value = ?raw.rain_prob, "unreadable rain probability");
        0.0
    });

    let rain_amount = match &raw.rain_amt {
        Some(RawValue::Text(s)) => patterns::rain_range_upper(s),
        Some(n) => n.as_f64(),
        None => Some(0.0),
    }
    .unwrap_or_else(|| {
        tracing::warn!(value = ?raw.rain_amt, "unreadable rain amount");
        0.0
    });

    let number = |v: &Option<RawValue>| v.as_ref().and_then(RawValue::as_f64).unwrap_or(UNKNOWN_NUMBER);

    Some(Forecast {
        time,
        condition: raw
            .wetr_txt
            .or(raw.wetr_sky_txt)
            .unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
        temperature: Temperature::celsius(number(&raw.tmpr)),
        rain_percent_chance,
        rain_amount,
        humidity: number(&raw.humd),
        wind_direction: raw.wind_drctn_name.unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
        wind_speed: number(&raw.wind_spd),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    const SCRIPT: &str = r#"
        var isDomestic = true;
        var hourlyFcastListJson = [
            {"aplYmdt": "2026101614", "rainProb": "-", "rainAmt": "0", "humd": "60",
             "windDrctnName": "북서풍", "windSpd": "2", "tmpr": 21, "wetrTxt": "맑음"},
            {"aplYmdt": "2026101615", "rainProb": 30, "rainAmt": "3~5", "humd": 65,
             "windDrctnName": "서풍", "windSpd": 3.5, "tmpr": "20", "wetrTxt": null,
             "wetrSkyTxt": "흐림"},
            {"aplYmdt": 2026101616, "rainProb": "60", "rainAmt": "0.1", "humd": 70,
             "windDrctnName": "서풍", "windSpd": 4, "tmpr": 19.5, "wetrTxt": "비"}
        ];
        var other = [1, 2];
    "#;

    #[test]
    fn maps_records_and_normalizes_fields() {
        let forecasts = hourly_from_script(SCRIPT);
        assert_eq!(forecasts.len(), 3);

        let first = &forecasts[0];
        let expected = NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|d| d.and_hms_opt(14, 0, 0))
            .expect("valid date");
        assert_eq!(first.time, expected);
        assert_eq!(first.rain_percent_chance, 0.0);
        assert_eq!(first.humidity, 60.0);
        assert_eq!(first.temperature, Temperature::celsius(21.0));
        assert_eq!(first.condition, "맑음");

        assert_eq!(forecasts[1].rain_amount, 5.0);
        assert_eq!(forecasts[1].rain_percent_chance, 30.0);
        assert_eq!(forecasts[1].condition, "흐림");
        assert_eq!(forecasts[1].wind_speed, 3.5);

        assert_eq!(forecasts[2].rain_amount, 0.1);
        assert_eq!(forecasts[2].rain_percent_chance, 60.0);
    }

    #[test]
    fn times_advance_by_one_hour() {
        let forecasts = hourly_from_script(SCRIPT);
        for pair in forecasts.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, Duration::hours(1));
        }
    }

    #[test]
    fn older_marker_is_accepted() {
        let script = r#"var townFcastListJson = [{"aplYmdt": "2026123123", "tmpr": -2}];"#;
        let forecasts = hourly_from_script(script);

        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].temperature.degrees, -2.0);
        assert_eq!(forecasts[0].wind_direction, UNKNOWN_TEXT);
        assert_eq!(forecasts[0].rain_amount, 0.0);
    }

    #[test]
    fn garbled_payload_yields_nothing() {
        assert!(hourly_from_script("var hourlyFcastListJson = [{\"aplYmdt\": ").is_empty());
        assert!(hourly_from_script("var isDomestic = false;").is_empty());
    }

    #[test]
    fn bad_time_discards_whole_list() {
        let script = r#"var hourlyFcastListJson = [
            {"aplYmdt": "2026101600"}, {"aplYmdt": "soon"}, {"aplYmdt": "2026101602"}
        ];"#;
        assert!(hourly_from_script(script).is_empty());
    }
}
