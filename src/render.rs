//! Terminal rendering for scrape results.
//!
//! Extension traits that add colored output to vmkcal-core types using
//! owo_colors.

use owo_colors::OwoColorize;
use vmkcal_core::ResolvedEvent;
use vmkcal_core::header::{MonthResolution, MonthSource};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ResolvedEvent {
    fn render(&self) -> String {
        let title = if self.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            self.title.bold().to_string()
        };
        let time = format!(
            "{} - {}",
            self.start.format("%a %b %-d %H:%M"),
            self.end.format("%H:%M")
        );
        format!("{} {} {}", "+".green(), title, time.dimmed())
    }
}

impl Render for MonthResolution {
    fn render(&self) -> String {
        let source = match self.source {
            MonthSource::Header => "from page header",
            MonthSource::Override => "from --year/--month",
            MonthSource::Today => "from today's date",
        };
        format!("📅 {} {}", self.context, format!("({})", source).dimmed())
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
