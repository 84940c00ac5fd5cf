use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use icalendar::parser::{read_calendar, unfold};
use vmkcal_core::dom::markers::Markers;
use vmkcal_core::header::{MonthOverride, MonthSource};
use vmkcal_core::ics::{FeedOptions, generate_feed_at, make_uid};
use vmkcal_core::scrape::scrape_html;

const SOURCE: &str = "https://download.myvmk.com/calendar.html";

fn fixture() -> &'static str {
    include_str!("fixtures/calendar.html")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
}

fn at(m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn test_scrape_fixture_page() {
    let scrape = scrape_html(
        fixture(),
        Some(SOURCE),
        MonthOverride::default(),
        &Markers::default(),
        today(),
    );

    assert_eq!(scrape.month.source, MonthSource::Header);
    assert_eq!((scrape.month.context.year, scrape.month.context.month), (2025, 10));

    let summary: Vec<_> = scrape
        .events
        .iter()
        .map(|e| (e.title.as_str(), e.start, e.end))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Pirates Game Night", at(10, 15, 18, 0), at(10, 15, 19, 0)),
            ("Late Show, Part 1; Encore", at(10, 15, 23, 30), at(10, 16, 0, 30)),
            ("Halloween Party", at(10, 31, 0, 0), at(10, 31, 23, 59)),
            ("", at(10, 31, 20, 0), at(10, 31, 21, 0)),
        ]
    );
    assert!(scrape.events.iter().all(|e| e.source_url.as_deref() == Some(SOURCE)));
}

#[test]
fn test_month_override_drops_days_past_month_end() {
    let scrape = scrape_html(
        fixture(),
        Some(SOURCE),
        MonthOverride {
            year: None,
            month: Some(4),
        },
        &Markers::default(),
        today(),
    );

    assert_eq!((scrape.month.context.year, scrape.month.context.month), (2025, 4));
    let titles: Vec<_> = scrape.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Pirates Game Night", "Late Show, Part 1; Encore"]);
}

#[test]
fn test_feed_from_fixture_parses_back() {
    let scrape = scrape_html(
        fixture(),
        Some(SOURCE),
        MonthOverride::default(),
        &Markers::default(),
        today(),
    );
    let options = FeedOptions {
        tzid: Some("America/New_York".to_string()),
        ..FeedOptions::default()
    };
    let generated_at = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
    let ics = generate_feed_at(&scrape.events, &options, generated_at);

    assert!(ics.ends_with("END:VCALENDAR\n"));
    assert!(!ics.contains('\r'));
    assert!(!ics.contains("September Leftover"));
    assert!(ics.contains("SUMMARY:Late Show\\, Part 1\\; Encore\n"));
    assert!(ics.contains("SUMMARY:MyVMK Event\n"));

    let unfolded = unfold(&ics);
    let calendar = read_calendar(&unfolded).expect("feed should parse as iCalendar");
    let vevents: Vec<_> = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .collect();
    assert_eq!(vevents.len(), 4);

    let first = vevents[0];
    let expected_uid = make_uid(
        "Pirates Game Night",
        &at(10, 15, 18, 0),
        &at(10, 15, 19, 0),
        "myvmk",
    );
    assert_eq!(first.find_prop("UID").unwrap().val.to_string(), expected_uid);
    assert_eq!(
        first.find_prop("DTSTART").unwrap().val.to_string(),
        "20251015T180000"
    );
}

#[test]
fn test_feed_is_stable_across_runs() {
    let run = || {
        let scrape = scrape_html(
            fixture(),
            Some(SOURCE),
            MonthOverride::default(),
            &Markers::default(),
            today(),
        );
        let generated_at = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        generate_feed_at(&scrape.events, &FeedOptions::default(), generated_at)
    };
    assert_eq!(run(), run());
}
