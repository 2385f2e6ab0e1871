//! The "now" section of a weather page.
//!
//! Domestic pages embed a `weatherSummary` JSON object in their last inline
//! script; global pages only render values into the DOM.

use serde::Deserialize;

use super::{RawValue, leading_json, snippet};
use crate::{
    CurrentConditions, Temperature,
    document::{Document, Node},
    error::{NalssiError, Result},
    patterns::{self, UNKNOWN_DUST, UNKNOWN_NUMBER, UNKNOWN_TEXT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Domestic,
    Global,
}

impl PageFormat {
    /// Read the last `isDomestic = ...;` flag in the script.
    pub fn detect(script: &str) -> Option<Self> {
        patterns::domestic_flag(script).map(|domestic| if domestic { Self::Domestic } else { Self::Global })
    }

    pub fn extract(self, area: Node<'_>, script: &str) -> CurrentConditions {
        match self {
            Self::Domestic => domestic(area, script),
            Self::Global => global(area),
        }
    }
}

/// Current conditions for the page, or [`NalssiError::PageStructureChanged`]
/// when the page is not recognisable at all.
pub fn extract_current(doc: &Document) -> Result<CurrentConditions> {
    let area = doc
        .select_first(".weather_area")
        .ok_or_else(|| NalssiError::PageStructureChanged("no .weather_area node".into()))?;

    let script = doc
        .last_inline_script()
        .ok_or_else(|| NalssiError::PageStructureChanged("page has no inline script".into()))?;

    let format = PageFormat::detect(&script).ok_or_else(|| {
        tracing::warn!(script = snippet(&script), "no isDomestic marker in last script");
        NalssiError::PageStructureChanged("cannot tell domestic from global page".into())
    })?;

    tracing::debug!(?format, "extracting current conditions");
    Ok(format.extract(area, &script))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    now_fcast: Option<RawNow>,
    air_fcast: Option<RawAir>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNow {
    tmpr: Option<RawValue>,
    stmpr: Option<RawValue>,
    humd: Option<RawValue>,
    wind_spd: Option<RawValue>,
    wind_drctn_name: Option<String>,
    wetr_txt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAir {
    #[serde(rename = "stationPM10Legend1")]
    pm10_legend: Option<String>,
    #[serde(rename = "stationPM25Legend1")]
    pm25_legend: Option<String>,
}

fn weather_summary(script: &str) -> Option<RawSummary> {
    let flat = script.replace(['\n', '\r'], "");

    let Some(payload) = patterns::after_weather_summary(&flat) else {
        tracing::warn!(script = snippet(&flat), "weatherSummary not found in last script");
        return None;
    };

    match leading_json::<RawSummary>(payload) {
        Ok(summary) => Some(summary),
        Err(err) => {
            tracing::warn!(script = snippet(payload), "failed to parse weatherSummary: {err}");
            None
        }
    }
}

fn number(value: Option<&RawValue>, what: &str) -> Option<f64> {
    let n = value.and_then(RawValue::as_f64);
    if n.is_none() {
        tracing::warn!("weatherSummary has no usable {what}");
    }
    n
}

fn text_of(node: Option<Node<'_>>) -> Option<String> {
    node.map(|n| n.text()).filter(|t| !t.is_empty())
}

fn domestic(area: Node<'_>, script: &str) -> CurrentConditions {
    let summary = weather_summary(script).unwrap_or_default();
    let now = summary.now_fcast.unwrap_or_default();
    let air = summary.air_fcast.unwrap_or_default();

    let temperature = number(now.tmpr.as_ref(), "tmpr")
        .or_else(|| visible_temperature(area))
        .unwrap_or(UNKNOWN_NUMBER);

    let condition = text_of(area.select_first(".weather"))
        .or(now.wetr_txt)
        .unwrap_or_else(|| UNKNOWN_TEXT.to_string());

    CurrentConditions {
        temperature: Temperature::celsius(temperature),
        feel_temperature: Temperature::celsius(
            number(now.stmpr.as_ref(), "stmpr").unwrap_or(UNKNOWN_NUMBER),
        ),
        humidity: number(now.humd.as_ref(), "humd").unwrap_or(UNKNOWN_NUMBER),
        wind_speed: number(now.wind_spd.as_ref(), "windSpd").unwrap_or(UNKNOWN_NUMBER),
        wind_direction: now.wind_drctn_name.unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
        condition,
        dust_level: air.pm10_legend.unwrap_or_else(|| UNKNOWN_DUST.to_string()),
        fine_dust_level: air.pm25_legend.unwrap_or_else(|| UNKNOWN_DUST.to_string()),
        rain_amount_now: rain_now(area),
    }
}

fn global(area: Node<'_>) -> CurrentConditions {
    let details = match area.select_first(".summary_list") {
        Some(list) => SummaryList::read(list),
        None => {
            tracing::warn!("global page has no .summary_list");
            SummaryList::default()
        }
    };

    let feel = area
        .select_first(".feel")
        .and_then(|n| patterns::temperature(&n.text()))
        .or_else(|| details.value("체감").and_then(patterns::temperature));

    let humidity = details.value("습도").and_then(patterns::percent);

    let (wind_direction, wind_speed) = match details.wind() {
        Some((label, value)) => (
            patterns::wind_direction(&format!("{label} {value}")),
            patterns::speed(value),
        ),
        None => {
            tracing::warn!("global page has no wind entry");
            (None, None)
        }
    };

    let condition = text_of(area.select_first(".weather")).unwrap_or_else(|| {
        tracing::warn!("global page has no condition text");
        UNKNOWN_TEXT.to_string()
    });

    CurrentConditions {
        temperature: Temperature::celsius(visible_temperature(area).unwrap_or(UNKNOWN_NUMBER)),
        feel_temperature: Temperature::celsius(feel.unwrap_or(UNKNOWN_NUMBER)),
        humidity: humidity.unwrap_or(UNKNOWN_NUMBER),
        wind_speed: wind_speed.unwrap_or(UNKNOWN_NUMBER),
        wind_direction: wind_direction.unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
        condition,
        dust_level: UNKNOWN_DUST.to_string(),
        fine_dust_level: UNKNOWN_DUST.to_string(),
        rain_amount_now: rain_now(area),
    }
}

/// `dt`/`dd` pairs of a `.summary_list`, in page order.
#[derive(Debug, Default)]
struct SummaryList {
    entries: Vec<(String, String)>,
}

impl SummaryList {
    fn read(list: Node<'_>) -> Self {
        let mut entries = Vec::new();
        let mut label: Option<String> = None;

        for node in list.select_all("dt, dd") {
            if node.name() == "dt" {
                label = Some(node.text());
            } else if let Some(label) = label.take() {
                entries.push((label, node.text()));
            }
        }

        Self { entries }
    }

    fn value(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Either `바람` → "남동풍 3m/s" or the direction itself as label.
    fn wind(&self) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(l, _)| l == "바람" || l.ends_with('풍'))
            .map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

fn visible_temperature(area: Node<'_>) -> Option<f64> {
    let current = area.select_first(".current")?;
    patterns::temperature(&current.text())
}

/// Rain so far, 0 when the page has no rainfall block.
fn rain_now(area: Node<'_>) -> f64 {
    let Some(block) = area.select_first(".summary_rainfall") else {
        return 0.0;
    };

    let text = block
        .select_first("strong")
        .map(|n| n.text())
        .unwrap_or_else(|| block.text());

    patterns::rain_mm(&text).unwrap_or(UNKNOWN_NUMBER)
}
