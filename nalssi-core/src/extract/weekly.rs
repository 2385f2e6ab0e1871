use chrono::{Datelike, Days, NaiveDate};

use crate::{
    DailyForecast, Temperature, WeeklyForecast,
    document::{Document, Node},
    patterns::{self, UNKNOWN_NUMBER, UNKNOWN_TEXT},
};

/// Today plus the nine following days.
pub const WEEKLY_DAYS: usize = 10;

/// Morning/afternoon forecasts from the `.week_list` section.
///
/// Dates are read as `M.D` and placed in `today`'s year. An item keeps its
/// slot even when damaged: an unreadable date becomes `today + i` and a
/// missing half is filled with sentinels. Pages without a week list (global
/// locations) produce an empty list.
pub fn extract_weekly(doc: &Document, today: NaiveDate) -> Vec<WeeklyForecast> {
    let Some(list) = doc.select_first(".week_list") else {
        tracing::debug!("page has no weekly forecast");
        return Vec::new();
    };

    list.select_all(".week_item")
        .into_iter()
        .take(WEEKLY_DAYS)
        .enumerate()
        .map(|(i, item)| week_item(item, today, i))
        .collect()
}

struct Half {
    condition: String,
    rain_chance: f64,
}

impl Half {
    fn unknown() -> Self {
        Self { condition: UNKNOWN_TEXT.to_string(), rain_chance: UNKNOWN_NUMBER }
    }
}

fn item_date(item: Node<'_>, today: NaiveDate, index: usize) -> NaiveDate {
    let fallback = today + Days::new(index as u64);

    let label = item.select_first(".date").map(|n| n.text()).unwrap_or_default();
    let Some((month, day)) = patterns::month_day(&label) else {
        tracing::warn!(label = %label, %fallback, "week item without a date");
        return fallback;
    };

    NaiveDate::from_ymd_opt(today.year(), month, day).unwrap_or_else(|| {
        tracing::warn!(month, day, %fallback, "week item with impossible date");
        fallback
    })
}

fn week_item(item: Node<'_>, today: NaiveDate, index: usize) -> WeeklyForecast {
    let date = item_date(item, today, index);

    let mut halves = item.select_all(".weather_inner").into_iter().map(half);
    let (morning, afternoon) = match (halves.next(), halves.next()) {
        (Some(morning), Some(afternoon)) => (morning, afternoon),
        (morning, _) => {
            tracing::warn!(%date, "week item needs morning and afternoon");
            (morning.unwrap_or_else(Half::unknown), Half::unknown())
        }
    };

    let temperature = item.select_first(".temperature");
    let bound = |css: &str| {
        temperature
            .and_then(|t| t.select_first(css))
            .and_then(|n| patterns::temperature(&n.text()))
            .unwrap_or(UNKNOWN_NUMBER)
    };

    WeeklyForecast {
        morning: DailyForecast {
            date,
            condition: morning.condition,
            rain_chance: morning.rain_chance,
            temperature: Temperature::celsius(bound(".lowest")),
        },
        afternoon: DailyForecast {
            date,
            condition: afternoon.condition,
            rain_chance: afternoon.rain_chance,
            temperature: Temperature::celsius(bound(".highest")),
        },
    }
}

fn half(inner: Node<'_>) -> Half {
    let condition = inner
        .attr("data-wetr-txt")
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_TEXT.to_string());

    let rain_chance = inner
        .select_first(".rainfall")
        .and_then(|n| patterns::percent(&n.text()))
        .unwrap_or(UNKNOWN_NUMBER);

    Half { condition, rain_chance }
}
