//! Occurrence dates as delivered by the backend and their calendar keys.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::event::RecurringEvent;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A date exactly as the API sent it: either a string (`2025-02-01`,
/// `2025-02-01T00:00:00.000Z`) or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Text(String),
    EpochMillis(i64),
}

impl DateValue {
    /// Calendar day this value names. Strings keep the part before any `T`;
    /// epoch values are read in UTC. Anything that is not a real date yields `None`.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Text(raw) => {
                let day = raw.split('T').next().unwrap_or(raw).trim();
                NaiveDate::parse_from_str(day, DATE_KEY_FORMAT).ok()
            }
            DateValue::EpochMillis(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|moment| moment.date_naive())
            }
        }
    }

    /// `YYYY-MM-DD` key used when matching occurrences against days.
    pub fn date_key(&self) -> Option<String> {
        self.calendar_date()
            .map(|date| date.format(DATE_KEY_FORMAT).to_string())
    }
}

impl From<&str> for DateValue {
    fn from(raw: &str) -> Self {
        DateValue::Text(raw.to_string())
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Text(date.format(DATE_KEY_FORMAT).to_string())
    }
}

/// Occurrence list of one entry. The backend sometimes omits the list or
/// sends something that is not an array; that shape is kept as `Missing`
/// because the grid treats it differently from an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Occurrences {
    Listed(Vec<DateValue>),
    #[default]
    Missing,
}

impl Occurrences {
    pub fn listed(&self) -> Option<&[DateValue]> {
        match self {
            Occurrences::Listed(dates) => Some(dates),
            Occurrences::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Occurrences::Missing)
    }
}

impl Serialize for Occurrences {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.listed().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Occurrences {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let Value::Array(items) = raw else {
            return Ok(Occurrences::Missing);
        };
        let dates = items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(DateValue::Text(text)),
                Value::Number(number) => number.as_i64().map(DateValue::EpochMillis),
                _ => None,
            })
            .collect();
        Ok(Occurrences::Listed(dates))
    }
}

/// An event paired with its concrete dates inside the fetched range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceEntry {
    pub event: RecurringEvent,
    #[serde(default)]
    pub occurrences: Occurrences,
}

impl OccurrenceEntry {
    pub fn new<I, D>(event: RecurringEvent, dates: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DateValue>,
    {
        Self {
            event,
            occurrences: Occurrences::Listed(dates.into_iter().map(Into::into).collect()),
        }
    }

    pub fn without_occurrences(event: RecurringEvent) -> Self {
        Self {
            event,
            occurrences: Occurrences::Missing,
        }
    }

    /// Dates used for aggregation and month filtering: the listed occurrences,
    /// or the event's start date when the list is empty or missing.
    pub fn effective_dates(&self) -> Vec<NaiveDate> {
        match self.occurrences.listed() {
            Some(dates) if !dates.is_empty() => parse_all(dates),
            _ => self.start_date_fallback(),
        }
    }

    /// Dates used when attaching the event to grid days. A missing list means
    /// the entry is not attached at all; only an empty list falls back to the
    /// start date.
    pub fn attachable_dates(&self) -> Option<Vec<NaiveDate>> {
        let dates = self.occurrences.listed()?;
        if dates.is_empty() {
            Some(self.start_date_fallback())
        } else {
            Some(parse_all(dates))
        }
    }

    pub fn occurs_in_month(&self, year: i32, month: u32) -> bool {
        self.effective_dates()
            .iter()
            .any(|date| date.year() == year && date.month() == month)
    }

    fn start_date_fallback(&self) -> Vec<NaiveDate> {
        self.event
            .start_date
            .as_ref()
            .and_then(DateValue::calendar_date)
            .into_iter()
            .collect()
    }
}

fn parse_all(dates: &[DateValue]) -> Vec<NaiveDate> {
    dates
        .iter()
        .filter_map(|value| {
            let parsed = value.calendar_date();
            if parsed.is_none() {
                tracing::debug!(?value, "skipping unparseable occurrence date");
            }
            parsed
        })
        .collect()
}
