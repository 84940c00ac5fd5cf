//! A small, parser-independent view of an HTML document.
//!
//! The rendered page is parsed once with `scraper` and copied into a plain
//! tree of [`Element`]s (tag name, attributes, children). All structural
//! matching in this crate works on that tree through the predicates in
//! [`markers`], so nothing outside this module knows which HTML parser
//! produced it.

pub mod markers;

use scraper::{ElementRef, Html};

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(Element),
    Text(String),
}

/// An HTML element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Child>,
}

impl Element {
    pub fn new(tag: &str, attributes: Vec<(String, String)>, children: Vec<Child>) -> Self {
        Element {
            tag: tag.to_ascii_lowercase(),
            attributes,
            children,
        }
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Text content with whitespace runs collapsed and the ends trimmed.
    ///
    /// `<span>October</span> <span>2025</span>` reads as `October 2025`,
    /// while adjacent inline runs such as `6:00<b>PM</b>` stay joined.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(element) => element.collect_text(out),
            }
        }
    }

    /// All descendant elements in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.child_elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Child::Element(element) => Some(element),
            Child::Text(_) => None,
        })
    }

    /// First descendant matching `pred`.
    pub fn find<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants().find(|element| pred(element))
    }

    /// Every descendant matching `pred`, in document order.
    pub fn find_all<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants().filter(|element| pred(element)).collect()
    }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.child_elements().rev());
        Some(next)
    }
}

/// A parsed page. The root is the `<html>` element.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse an HTML string. HTML parsing never fails; garbage in yields a
    /// (mostly empty) tree.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Document {
            root: convert(parsed.root_element()),
        }
    }

    pub fn find<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        if pred(&self.root) {
            return Some(&self.root);
        }
        self.root.find(pred)
    }

    pub fn find_all<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        if pred(&self.root) {
            found.push(&self.root);
        }
        found.extend(self.root.find_all(pred));
        found
    }
}

fn convert(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let attributes = value
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let children = element
        .children()
        .filter_map(|child| {
            if let Some(child_element) = ElementRef::wrap(child) {
                return Some(Child::Element(convert(child_element)));
            }
            match child.value() {
                scraper::Node::Text(text) => {
                    let text: &str = text;
                    Some(Child::Text(text.to_string()))
                }
                _ => None,
            }
        })
        .collect();

    Element::new(value.name(), attributes, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_collapses_whitespace_between_inline_runs() {
        let doc = Document::parse(
            "<div id=\"a\">\n  <span>October</span>\n  <span>2025</span>\n</div>\
             <p id=\"b\">6:00<b>PM</b></p>",
        );
        let a = doc.find(|e| e.attr("id") == Some("a")).unwrap();
        let b = doc.find(|e| e.attr("id") == Some("b")).unwrap();
        assert_eq!(a.text(), "October 2025");
        assert_eq!(b.text(), "6:00PM");
    }

    #[test]
    fn test_find_all_is_document_order_and_includes_nested() {
        let doc = Document::parse(
            "<ul><li class=\"x\" id=\"1\"><ul><li class=\"x\" id=\"2\"></li></ul></li>\
             <li class=\"x\" id=\"3\"></li></ul>",
        );
        let ids: Vec<_> = doc
            .find_all(|e| e.has_class("x"))
            .into_iter()
            .filter_map(|e| e.attr("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_element_find_excludes_self() {
        let doc = Document::parse("<div class=\"day\"><div class=\"day\" id=\"inner\"></div></div>");
        let outer = doc.find(|e| e.has_class("day")).unwrap();
        let inner = outer.find(|e| e.has_class("day")).unwrap();
        assert_eq!(inner.attr("id"), Some("inner"));
        assert!(inner.find(|e| e.has_class("day")).is_none());
    }

    #[test]
    fn test_classes_split_on_any_whitespace() {
        let doc = Document::parse("<div class=\" day\t hidden \"></div>");
        let div = doc.find(|e| e.tag() == "div").unwrap();
        assert_eq!(div.classes().collect::<Vec<_>>(), vec!["day", "hidden"]);
        assert!(div.has_class("hidden"));
        assert!(!div.has_class("hid"));
    }
}
