//! ICS feed generation.

use chrono::{DateTime, NaiveDateTime, Utc};
use sha2::{Digest, Sha256};

use crate::event::ResolvedEvent;

/// Document-level settings for a generated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOptions {
    /// X-WR-CALNAME
    pub calendar_name: String,
    pub product_id: String,
    /// TZID label put on DTSTART/DTEND. `None` emits floating local times.
    pub tzid: Option<String>,
    /// SUMMARY used for events without a title.
    pub placeholder_title: String,
    /// Suffix of every UID, after the `@`.
    pub uid_domain: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        FeedOptions {
            calendar_name: "MyVMK Events".to_string(),
            product_id: "-//MyVMK Scraper//EN".to_string(),
            tzid: None,
            placeholder_title: "MyVMK Event".to_string(),
            uid_domain: "myvmk".to_string(),
        }
    }
}

/// Generate the full feed, stamped with the current time.
pub fn generate_feed(events: &[ResolvedEvent], options: &FeedOptions) -> String {
    generate_feed_at(events, options, Utc::now())
}

/// Generate the full feed with an explicit DTSTAMP shared by every event.
pub fn generate_feed_at(
    events: &[ResolvedEvent],
    options: &FeedOptions,
    generated_at: DateTime<Utc>,
) -> String {
    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();
    let tzid = options.tzid.as_deref().filter(|tz| !tz.is_empty());

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", escape_text(&options.product_id)),
        "CALSCALE:GREGORIAN".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&options.calendar_name)),
    ];

    for event in events {
        let title = if event.title.is_empty() {
            options.placeholder_title.as_str()
        } else {
            event.title.as_str()
        };

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!(
            "UID:{}",
            make_uid(title, &event.start, &event.end, &options.uid_domain)
        ));
        lines.push(format!("SUMMARY:{}", escape_text(title)));
        lines.push(datetime_line("DTSTART", &event.start, tzid));
        lines.push(datetime_line("DTEND", &event.end, tzid));
        if let Some(source) = event.source_url.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("DESCRIPTION:{}", escape_text(source)));
        }
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Escape a TEXT value. Backslashes go first so the escapes added for the
/// other characters are not escaped again. Any line break (`\r\n`, `\r` or
/// `\n`) becomes a literal `\n`.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\\n")
}

/// Stable UID for an event: hex SHA-256 of `title|start|end` plus the domain.
pub fn make_uid(title: &str, start: &NaiveDateTime, end: &NaiveDateTime, domain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"|");
    hasher.update(iso_timestamp(start).as_bytes());
    hasher.update(b"|");
    hasher.update(iso_timestamp(end).as_bytes());
    format!("{}@{}", hex::encode(hasher.finalize()), domain)
}

fn iso_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// `DTSTART;TZID=America/New_York:20251015T180000`, or without the TZID
/// parameter for floating times.
fn datetime_line(name: &str, dt: &NaiveDateTime, tzid: Option<&str>) -> String {
    let stamp = dt.format("%Y%m%dT%H%M%S");
    match tzid {
        Some(tzid) => format!("{};TZID={}:{}", name, tzid, stamp),
        None => format!("{}:{}", name, stamp),
    }
}
