//! The scrape pipeline: rendered HTML in, resolved events out.

use chrono::NaiveDate;

use crate::dom::Document;
use crate::dom::markers::Markers;
use crate::event::ResolvedEvent;
use crate::extract;
use crate::header::{self, MonthOverride, MonthResolution};

/// Result of scraping one page.
#[derive(Debug, Clone)]
pub struct Scrape {
    pub month: MonthResolution,
    /// In page order.
    pub events: Vec<ResolvedEvent>,
}

/// Parse `html`, work out its month and turn every visible event into a
/// [`ResolvedEvent`] tagged with `source_url`.
///
/// `today` is only consulted when the month cannot be determined otherwise.
pub fn scrape_html(
    html: &str,
    source_url: Option<&str>,
    overrides: MonthOverride,
    markers: &Markers,
    today: NaiveDate,
) -> Scrape {
    let doc = Document::parse(html);
    let month = header::resolve(&doc, markers, overrides, today);

    let raw_events = extract::extract_events(&doc, month.context, markers);
    let events: Vec<ResolvedEvent> = raw_events
        .iter()
        .filter_map(|raw| raw.resolve(source_url))
        .collect();

    tracing::info!("Parsed {} events for {}", events.len(), month.context);

    Scrape { month, events }
}
