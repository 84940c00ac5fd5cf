//! Working out which month the calendar page is showing.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::dom::Document;
use crate::dom::markers::{self, Markers};
use crate::event::MonthContext;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)({})\s+([0-9]{{4}})", MONTHS.join("|"));
    Regex::new(&pattern).expect("month/year pattern is valid")
});

/// Caller-supplied values that win over whatever the page says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthOverride {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Where the resolved month came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSource {
    /// Parsed from the page header, possibly with some fields overridden.
    Header,
    /// Every field came from overrides.
    Override,
    /// At least one field fell back to today's date.
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthResolution {
    pub context: MonthContext,
    pub source: MonthSource,
}

/// Find the first `<month> <year>` text in the header element, then in the
/// headings, in that order.
pub fn parse_header(doc: &Document, markers: &Markers) -> Option<MonthContext> {
    let header = doc.find(|e| markers::is_header(e, markers));
    let headings = doc.find_all(|e| markers::is_heading(e, markers));

    header
        .into_iter()
        .chain(headings)
        .find_map(|element| parse_month_year(&element.text()))
}

/// Parse the first `October 2025`-style match in `text`.
pub fn parse_month_year(text: &str) -> Option<MonthContext> {
    let caps = MONTH_YEAR_RE.captures(text)?;
    let name = caps[1].to_ascii_lowercase();
    let month = MONTHS.iter().position(|m| *m == name)? as u32 + 1;
    let year = caps[2].parse().ok()?;
    Some(MonthContext { year, month })
}

/// Resolve the month context for a page. Never fails.
///
/// Each override replaces its own field only. A month override outside 1-12
/// is ignored. Any field still unknown afterwards is taken from `today`.
pub fn resolve(
    doc: &Document,
    markers: &Markers,
    overrides: MonthOverride,
    today: NaiveDate,
) -> MonthResolution {
    let parsed = parse_header(doc, markers);
    match parsed {
        Some(ctx) => tracing::debug!("Page header shows {}", ctx),
        None => tracing::debug!("No month/year found in page header"),
    }

    let month_override = overrides.month.filter(|m| (1..=12).contains(m));
    if let Some(month) = overrides.month.filter(|_| month_override.is_none()) {
        tracing::warn!("Ignoring month override {}; expected 1-12", month);
    }

    let year = overrides.year.or(parsed.map(|c| c.year));
    let month = month_override.or(parsed.map(|c| c.month));

    let source = if overrides.year.is_some() && month_override.is_some() {
        MonthSource::Override
    } else if year.is_some() && month.is_some() {
        MonthSource::Header
    } else {
        MonthSource::Today
    };

    let context = MonthContext {
        year: year.unwrap_or_else(|| today.year()),
        month: month.unwrap_or_else(|| today.month()),
    };

    if source == MonthSource::Today {
        tracing::warn!(
            "Could not parse header month/year; defaulting to {}",
            context
        );
    }

    MonthResolution { context, source }
}
