//! Turning a weather page into a [`Weather`] snapshot.

pub mod current;
pub mod hourly;
pub mod weekly;

use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{Weather, document::Document, error::Result};

pub use current::{PageFormat, extract_current};
pub use hourly::extract_hourly;
pub use weekly::extract_weekly;

/// Parse a full weather page. `today` anchors the weekly forecast dates.
///
/// Only a missing `.weather_area` or an undeterminable page format is an
/// error; every other gap is logged and filled with a sentinel.
pub fn parse_weather_page(html: &str, today: NaiveDate) -> Result<Weather> {
    let doc = Document::parse(html);

    let current = extract_current(&doc)?;
    let forecasts = extract_hourly(&doc);
    let weekly = extract_weekly(&doc, today);

    Ok(Weather::new(current, forecasts, weekly))
}

/// A scalar the provider sometimes sends as a number and sometimes as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub(crate) fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Deserialize the first JSON value at the start of `text`, ignoring whatever follows it.
pub(crate) fn leading_json<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<T>();
    match stream.next() {
        Some(value) => value,
        None => Err(serde::de::Error::custom("no JSON value after marker")),
    }
}

/// Keep log lines readable when a whole script is attached to them.
pub(crate) fn snippet(script: &str) -> &str {
    const MAX: usize = 500;
    if script.len() <= MAX {
        return script;
    }
    let mut end = MAX;
    while !script.is_char_boundary(end) {
        end -= 1;
    }
    &script[..end]
}
