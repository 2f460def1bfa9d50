use crate::snapshot::element::{ElementClass, ElementRecord};
use crate::snapshot::format::{self, Classification};
use crate::snapshot::registry::{ElementRef, ElementRegistry};
use serde::Deserialize;

/// Raw payload returned by the page collection script: one consistent
/// observation of the whole document.
#[derive(Debug, Deserialize)]
pub struct PageDocument {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
}

/// One complete textual rendering of a page's visible DOM, plus the
/// identifier registry valid for exactly this rendering.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Page URL captured at the start of the pass
    pub page_url: String,

    /// Page title captured at the start of the pass
    pub page_title: String,

    /// Formatted lines in DOM pre-order
    pub lines: Vec<String>,

    /// Id to element mapping for this pass only
    pub registry: ElementRegistry,
}

impl Snapshot {
    /// Total number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of id-bearing elements found in this pass
    pub fn count_interactive(&self) -> usize {
        self.registry.len()
    }
}

/// Builds a [`Snapshot`] from one batched page observation.
///
/// Elements are processed in document pre-order: the visibility filter
/// drops unrendered elements before anything else happens to them, id-bearing
/// survivors are registered, and formatted lines accumulate until the
/// optional line budget is reached.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    max_lines: Option<usize>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the pass early once this many lines have been produced
    pub fn max_lines(mut self, max: usize) -> Self {
        self.max_lines = if max == 0 { None } else { Some(max) };
        self
    }

    /// Run the pass over a page observation
    pub fn build(&self, document: PageDocument) -> Snapshot {
        let mut snapshot = Snapshot {
            page_url: document.url,
            page_title: document.title,
            lines: Vec::new(),
            registry: ElementRegistry::new(),
        };

        for record in &document.elements {
            if self.budget_spent(&snapshot) {
                break;
            }
            if !record.is_visible() {
                continue;
            }

            let class = ElementClass::of(&record.tag);
            if class == ElementClass::Skipped {
                continue;
            }

            let id_suffix = match format::classify(record, &class) {
                Classification::Interactive | Classification::Clickable => {
                    match &record.r#ref {
                        Some(token) => {
                            let id = snapshot
                                .registry
                                .allocate(ElementRef::new(token.clone(), record.tag.clone()));
                            format!("${}", id)
                        }
                        // The collection script failed to stamp this element;
                        // emit it without an id rather than lose the line.
                        None => {
                            log::warn!("unstamped id-bearing element <{}>", record.tag);
                            String::new()
                        }
                    }
                }
                Classification::Plain => String::new(),
            };

            for line in format::format_lines(record, &class, &id_suffix) {
                if self.budget_spent(&snapshot) {
                    break;
                }
                snapshot.lines.push(line);
            }
        }

        snapshot
    }

    fn budget_spent(&self, snapshot: &Snapshot) -> bool {
        self.max_lines.is_some_and(|max| snapshot.lines.len() >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(elements: Vec<ElementRecord>) -> PageDocument {
        PageDocument {
            url: "https://x.test/".to_string(),
            title: "Test".to_string(),
            elements,
        }
    }

    fn anchor(text: &str, href: &str, token: &str) -> ElementRecord {
        let mut record = ElementRecord::new("a").visible().with_text(text).with_ref(token);
        record.href = Some(href.to_string());
        record
    }

    #[test]
    fn test_lines_in_document_order() {
        let snapshot = SnapshotBuilder::new().build(document(vec![
            ElementRecord::new("h1").visible().with_text("Title"),
            ElementRecord::new("p").visible().with_text("Body"),
            anchor("Go", "https://x.test/go", "1-0"),
        ]));

        assert_eq!(snapshot.lines, vec!["# Title", "Body", "[Go](https://x.test/go)$0"]);
    }

    #[test]
    fn test_ids_assigned_in_encounter_order() {
        let snapshot = SnapshotBuilder::new().build(document(vec![
            anchor("One", "https://x.test/1", "1-0"),
            ElementRecord::new("p").visible().with_text("filler"),
            ElementRecord::new("button").visible().with_text("Two").with_ref("1-1"),
            anchor("Go", "https://x.test/path", "1-2"),
        ]));

        assert_eq!(snapshot.count_interactive(), 3);
        // the third interactive element gets id 2
        assert_eq!(snapshot.lines.last().unwrap(), "[Go](https://x.test/path)$2");
    }

    #[test]
    fn test_registry_ids_are_contiguous() {
        let snapshot = SnapshotBuilder::new().build(document(vec![
            anchor("a", "https://x.test/a", "1-0"),
            ElementRecord::new("button").visible().with_text("b").with_ref("1-1"),
            ElementRecord::new("div")
                .visible()
                .with_click_handler()
                .with_ref("1-2")
                .with_text("c"),
        ]));

        let ids: Vec<usize> = snapshot.registry.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(snapshot.registry.is_valid(2));
        assert!(!snapshot.registry.is_valid(3));
    }

    #[test]
    fn test_invisible_element_emits_nothing_and_consumes_no_id() {
        let mut hidden_link = anchor("Hidden", "https://x.test/h", "1-0");
        hidden_link.width = 0.0;
        hidden_link.height = 0.0;

        let snapshot = SnapshotBuilder::new().build(document(vec![
            hidden_link,
            anchor("Shown", "https://x.test/s", "1-1"),
        ]));

        assert_eq!(snapshot.lines, vec!["[Shown](https://x.test/s)$0"]);
        assert_eq!(snapshot.count_interactive(), 1);
    }

    #[test]
    fn test_hidden_by_style_skipped_even_with_click_handler() {
        let mut record = ElementRecord::new("div")
            .visible()
            .with_click_handler()
            .with_ref("1-0")
            .with_text("menu");
        record.own_text = Some("menu".to_string());
        record.hidden = true;

        let snapshot = SnapshotBuilder::new().build(document(vec![record]));
        assert!(snapshot.lines.is_empty());
        assert!(snapshot.registry.is_empty());
    }

    #[test]
    fn test_clickable_generic_gets_id_suffix() {
        let mut record =
            ElementRecord::new("div").visible().with_click_handler().with_ref("1-0");
        record.own_text = Some("Open menu".to_string());

        let snapshot = SnapshotBuilder::new().build(document(vec![record]));
        assert_eq!(snapshot.lines, vec!["Open menu$0"]);
        assert_eq!(snapshot.count_interactive(), 1);
    }

    #[test]
    fn test_clickable_element_with_no_text_still_consumes_id() {
        let mut silent =
            ElementRecord::new("div").visible().with_click_handler().with_ref("1-0");
        silent.own_text = Some("".to_string());

        let snapshot = SnapshotBuilder::new().build(document(vec![
            silent,
            anchor("Next", "https://x.test/n", "1-1"),
        ]));

        // no line for the silent element, but the id sequence moved on
        assert_eq!(snapshot.lines, vec!["[Next](https://x.test/n)$1"]);
        assert_eq!(snapshot.count_interactive(), 2);
    }

    #[test]
    fn test_list_emits_grouped_lines() {
        let mut list = ElementRecord::new("ol").visible();
        list.items = Some(vec!["alpha".to_string(), "beta".to_string()]);

        let snapshot = SnapshotBuilder::new().build(document(vec![list]));
        assert_eq!(snapshot.lines, vec!["1. alpha", "2. beta"]);
    }

    #[test]
    fn test_max_lines_stops_early() {
        let snapshot = SnapshotBuilder::new().max_lines(2).build(document(vec![
            ElementRecord::new("p").visible().with_text("one"),
            ElementRecord::new("p").visible().with_text("two"),
            ElementRecord::new("p").visible().with_text("three"),
            anchor("late", "https://x.test/l", "1-0"),
        ]));

        assert_eq!(snapshot.lines, vec!["one", "two"]);
        // elements past the budget never reach the registry
        assert_eq!(snapshot.count_interactive(), 0);
    }

    #[test]
    fn test_max_lines_zero_means_unbounded() {
        let snapshot = SnapshotBuilder::new().max_lines(0).build(document(vec![
            ElementRecord::new("p").visible().with_text("one"),
            ElementRecord::new("p").visible().with_text("two"),
        ]));
        assert_eq!(snapshot.line_count(), 2);
    }

    #[test]
    fn test_script_and_style_never_emit() {
        let snapshot = SnapshotBuilder::new().build(document(vec![
            ElementRecord::new("script").visible().with_text("var x = 1;"),
            ElementRecord::new("style").visible().with_text(".a { color: red }"),
            ElementRecord::new("p").visible().with_text("real"),
        ]));
        assert_eq!(snapshot.lines, vec!["real"]);
    }

    #[test]
    fn test_page_document_deserialization() {
        let json = r#"{
            "url": "https://x.test/",
            "title": "Home",
            "elements": [
                {"tag": "h1", "width": 300.0, "height": 40.0, "text": "Welcome"}
            ]
        }"#;

        let document: PageDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.title, "Home");
        assert_eq!(document.elements.len(), 1);

        let snapshot = SnapshotBuilder::new().build(document);
        assert_eq!(snapshot.lines, vec!["# Welcome"]);
        assert_eq!(snapshot.page_title, "Home");
    }
}
