//! Walking the calendar grid and pulling out the events of each day.

use crate::dom::markers::{self, Markers};
use crate::dom::{Document, Element};
use crate::event::{MonthContext, RawEvent};

/// Extract every event shown in the visible day cells, in page order.
///
/// Day cells without a numeric label, or whose label is not a real day of
/// `month`, are skipped. Entries with neither a title nor a time are noise
/// and dropped.
pub fn extract_events(doc: &Document, month: MonthContext, markers: &Markers) -> Vec<RawEvent> {
    let days = doc.find_all(|e| markers::is_day_container(e, markers));
    tracing::debug!("Found {} visible day cells", days.len());

    let mut events = Vec::new();
    for day in days {
        let Some(day_number) = day_number(day, markers) else {
            continue;
        };

        let Some(date) = month.date(day_number) else {
            tracing::debug!("Skipping day {} (not a day of {})", day_number, month);
            continue;
        };

        let entries = day.find_all(|e| markers::is_event_entry(e, markers));
        if !entries.is_empty() {
            tracing::debug!("{}: {} event entries", date, entries.len());
        }

        for entry in entries {
            if let Some(event) = read_entry(entry, day_number, month, markers) {
                events.push(event);
            }
        }
    }

    events
}

/// The numeric label of a day cell, if it has one.
fn day_number(day: &Element, markers: &Markers) -> Option<u32> {
    let label = day.find(|e| markers::is_day_number(e, markers))?.text();
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_digit()) {
        tracing::debug!("Skipping day cell with label {:?}", label);
        return None;
    }
    label.parse().ok()
}

fn read_entry(
    entry: &Element,
    day_number: u32,
    month: MonthContext,
    markers: &Markers,
) -> Option<RawEvent> {
    let detail = entry
        .find(|e| markers::is_event_detail(e, markers))
        .unwrap_or(entry);

    let field = |pred: fn(&Element, &Markers) -> bool| {
        detail
            .find(|e| pred(e, markers))
            .map(Element::text)
            .unwrap_or_default()
    };
    let title = field(markers::is_event_title);
    let time_text = field(markers::is_event_time);

    if title.is_empty() && time_text.is_empty() {
        return None;
    }

    Some(RawEvent {
        title,
        time_text,
        day_number,
        year: month.year,
        month: month.month,
    })
}
