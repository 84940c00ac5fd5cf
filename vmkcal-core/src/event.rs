//! Event types flowing through the scrape pipeline.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::time_range;

/// The month a calendar page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthContext {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthContext {
    /// Date of `day` in this month, if that day exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl fmt::Display for MonthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// An event exactly as found in the page, before any time interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// May be empty; the feed substitutes a placeholder name.
    pub title: String,
    pub time_text: String,
    pub day_number: u32,
    pub year: i32,
    pub month: u32,
}

impl RawEvent {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day_number)
    }

    /// Interpret the time text against the event's date.
    ///
    /// Returns `None` only if the day does not exist in the month, which the
    /// extractor already filters out.
    pub fn resolve(&self, source_url: Option<&str>) -> Option<ResolvedEvent> {
        let date = self.date()?;
        let (start, end) = time_range::interpret(&self.time_text, date);
        Some(ResolvedEvent {
            title: self.title.clone(),
            start,
            end,
            source_url: source_url.map(str::to_string),
        })
    }
}

/// An event with concrete wall-clock start and end. `end` is always after
/// `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub source_url: Option<String>,
}
