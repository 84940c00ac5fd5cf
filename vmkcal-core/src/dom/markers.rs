//! Structural markers of the calendar page and the predicates that test them.
//!
//! A marker is a tag name plus a set of class tokens that must all be
//! present. The defaults describe the MyVMK calendar markup; any of them can
//! be replaced from the config file when the page layout changes.

use serde::Deserialize;

use super::Element;

/// Tag name plus required class tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Marker {
    /// Required tag name. `None` matches any tag.
    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub classes: Vec<String>,
}

impl Marker {
    pub fn new(tag: &str, classes: &[&str]) -> Self {
        Marker {
            tag: Some(tag.to_string()),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn any_tag(classes: &[&str]) -> Self {
        Marker {
            tag: None,
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        let tag_ok = self
            .tag
            .as_deref()
            .is_none_or(|tag| element.tag().eq_ignore_ascii_case(tag));
        tag_ok && self.classes.iter().all(|class| element.has_class(class))
    }
}

/// The full set of markers used to walk the calendar page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub header: Marker,
    pub headings: Vec<String>,
    pub day: Marker,
    pub hidden_class: String,
    pub day_number: Marker,
    pub event_entry: Marker,
    pub event_detail: Marker,
    pub event_title: Marker,
    pub event_time: Marker,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            header: Marker::any_tag(&["header"]),
            headings: vec!["h1".to_string(), "h2".to_string()],
            day: Marker::new("div", &["day"]),
            hidden_class: "hidden".to_string(),
            day_number: Marker::new("p", &["number"]),
            event_entry: Marker::new("li", &["event-li"]),
            event_detail: Marker::new("div", &["event", "day-targetable"]),
            event_title: Marker::new("p", &["event-title"]),
            event_time: Marker::new("p", &["event-time"]),
        }
    }
}

pub fn is_header(element: &Element, markers: &Markers) -> bool {
    markers.header.matches(element)
}

pub fn is_heading(element: &Element, markers: &Markers) -> bool {
    markers
        .headings
        .iter()
        .any(|tag| element.tag().eq_ignore_ascii_case(tag))
}

/// An element is hidden when it carries the hidden class or the HTML
/// `hidden` attribute.
pub fn is_visible(element: &Element, markers: &Markers) -> bool {
    !element.has_class(&markers.hidden_class) && !element.has_attr("hidden")
}

/// A calendar day cell that is actually shown. Hidden wins over the day
/// marker: padding cells from neighbouring months carry both.
pub fn is_day_container(element: &Element, markers: &Markers) -> bool {
    markers.day.matches(element) && is_visible(element, markers)
}

pub fn is_day_number(element: &Element, markers: &Markers) -> bool {
    markers.day_number.matches(element)
}

pub fn is_event_entry(element: &Element, markers: &Markers) -> bool {
    markers.event_entry.matches(element)
}

pub fn is_event_detail(element: &Element, markers: &Markers) -> bool {
    markers.event_detail.matches(element)
}

pub fn is_event_title(element: &Element, markers: &Markers) -> bool {
    markers.event_title.matches(element)
}

pub fn is_event_time(element: &Element, markers: &Markers) -> bool {
    markers.event_time.matches(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn first<'a>(doc: &'a Document, id: &str) -> &'a Element {
        doc.find(|e| e.attr("id") == Some(id)).unwrap()
    }

    #[test]
    fn test_hidden_day_is_not_a_day_container() {
        let markers = Markers::default();
        let doc = Document::parse(
            r#"<div id="a" class="day"></div>
               <div id="b" class="day hidden"></div>
               <div id="c" class="day" hidden></div>
               <span id="d" class="day"></span>"#,
        );
        assert!(is_day_container(first(&doc, "a"), &markers));
        assert!(!is_day_container(first(&doc, "b"), &markers));
        assert!(!is_day_container(first(&doc, "c"), &markers));
        assert!(!is_day_container(first(&doc, "d"), &markers));
    }

    #[test]
    fn test_class_tokens_must_match_exactly() {
        let markers = Markers::default();
        let doc = Document::parse(
            r#"<div id="a" class="weekday"></div><div id="b" class="day-label"></div>"#,
        );
        assert!(!is_day_container(first(&doc, "a"), &markers));
        assert!(!is_day_container(first(&doc, "b"), &markers));
    }

    #[test]
    fn test_event_detail_needs_every_class() {
        let markers = Markers::default();
        let doc = Document::parse(
            r#"<div id="a" class="event"></div>
               <div id="b" class="day-targetable event extra"></div>"#,
        );
        assert!(!is_event_detail(first(&doc, "a"), &markers));
        assert!(is_event_detail(first(&doc, "b"), &markers));
    }

    #[test]
    fn test_header_marker_matches_any_tag() {
        let markers = Markers::default();
        let doc = Document::parse(
            r#"<section id="a" class="header"></section><h2 id="b"></h2><h3 id="c"></h3>"#,
        );
        assert!(is_header(first(&doc, "a"), &markers));
        assert!(is_heading(first(&doc, "b"), &markers));
        assert!(!is_heading(first(&doc, "c"), &markers));
    }
}
