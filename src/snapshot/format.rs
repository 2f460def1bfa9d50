use crate::snapshot::element::{ElementClass, ElementRecord};

/// Longest `src`/`href` emitted verbatim; longer values keep the tail
const URL_MAX_LEN: usize = 30;

/// How an element participates in the id scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Intrinsically actionable tag; always consumes an id
    Interactive,
    /// Any other element carrying a click/dblclick handler; consumes an id
    Clickable,
    /// Emits text only, no id
    Plain,
}

/// Classify one element for id allocation
pub fn classify(record: &ElementRecord, class: &ElementClass) -> Classification {
    if class.is_interactive() {
        Classification::Interactive
    } else if record.clickable {
        Classification::Clickable
    } else {
        Classification::Plain
    }
}

/// Format one element into its output lines.
///
/// `id_suffix` is `"$<id>"` for id-bearing elements and empty otherwise.
/// Blank results are dropped here so the builder only ever appends real
/// lines. Suffix placement: single-line rules append it directly; `pre` and
/// `table` carry it on their last line; lists carry it on every item line.
pub fn format_lines(record: &ElementRecord, class: &ElementClass, id_suffix: &str) -> Vec<String> {
    match class {
        ElementClass::Heading(level) => {
            text_line(&record.text, |t| {
                format!("{} {}{}", "#".repeat(*level as usize), t, id_suffix)
            })
        }
        ElementClass::Paragraph => text_line(&record.text, |t| format!("{}{}", t, id_suffix)),
        ElementClass::Strong => text_line(&record.text, |t| format!("**{}**{}", t, id_suffix)),
        ElementClass::Emphasis => text_line(&record.text, |t| format!("*{}*{}", t, id_suffix)),
        ElementClass::Mark => text_line(&record.text, |t| format!("`{}`{}", t, id_suffix)),
        ElementClass::Blockquote => text_line(&record.text, |t| format!("> {}{}", t, id_suffix)),
        ElementClass::Preformatted => {
            if record.text.trim().is_empty() {
                return Vec::new();
            }
            let mut lines = vec!["```".to_string()];
            lines.extend(record.text.lines().map(|l| l.to_string()));
            lines.push(format!("```{}", id_suffix));
            lines
        }
        ElementClass::Table => {
            let rows = record.rows.as_deref().unwrap_or_default();
            let mut lines: Vec<String> = rows
                .iter()
                .filter(|cells| !cells.is_empty())
                .map(|cells| {
                    let cells: Vec<String> = cells.iter().map(|c| collapse_ws(c)).collect();
                    format!("| {} |", cells.join(" | "))
                })
                .collect();
            if let Some(last) = lines.last_mut() {
                last.push_str(id_suffix);
            }
            lines
        }
        ElementClass::BulletList => {
            items_of(record)
                .map(|item| format!("- {}{}", item, id_suffix))
                .collect()
        }
        ElementClass::NumberedList => {
            items_of(record)
                .enumerate()
                .map(|(n, item)| format!("{}. {}{}", n + 1, item, id_suffix))
                .collect()
        }
        ElementClass::Anchor => {
            let href = truncate_url(record.href.as_deref().unwrap_or(""));
            vec![format!("[{}]({}){}", collapse_ws(&record.text), href, id_suffix)]
        }
        ElementClass::Image => {
            let alt = match record.alt.as_deref() {
                Some(alt) if !alt.trim().is_empty() => collapse_ws(alt),
                _ => "Image".to_string(),
            };
            let src = truncate_url(record.src.as_deref().unwrap_or(""));
            vec![format!("![{}]({}){}", alt, src, id_suffix)]
        }
        ElementClass::Input => {
            let input_type = record.input_type.as_deref().unwrap_or("text");
            let placeholder = record.placeholder.as_deref().unwrap_or("");
            let label = label_of(record);
            vec![format!("?input:{}[{}]({}){}", input_type, placeholder, label, id_suffix)]
        }
        ElementClass::TextArea => {
            let label = label_of(record);
            vec![format!("?textarea[{}]({}){}", collapse_ws(&record.text), label, id_suffix)]
        }
        ElementClass::Button => {
            vec![format!("?button[{}]{}", collapse_ws(&record.text), id_suffix)]
        }
        ElementClass::Select => {
            let options: Vec<String> = record
                .options
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|o| collapse_ws(o))
                .collect();
            let label = label_of(record);
            vec![format!("?select[\"{}\"]({}){}", options.join(", "), label, id_suffix)]
        }
        ElementClass::Generic => {
            let own = record.own_text.as_deref().unwrap_or("");
            text_line(own, |t| format!("{}{}", t, id_suffix))
        }
        ElementClass::Skipped => Vec::new(),
    }
}

/// Truncate a URL from the front, keeping the tail where the identity of a
/// path usually lives, and mark the cut with a leading ellipsis.
pub fn truncate_url(url: &str) -> String {
    if url.chars().count() <= URL_MAX_LEN {
        url.to_string()
    } else {
        let tail: String = url
            .chars()
            .rev()
            .take(URL_MAX_LEN)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces
fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn label_of(record: &ElementRecord) -> String {
    collapse_ws(record.label.as_deref().unwrap_or(""))
}

/// Emit one line built from non-blank text, or nothing
fn text_line(text: &str, build: impl FnOnce(&str) -> String) -> Vec<String> {
    let collapsed = collapse_ws(text);
    if collapsed.is_empty() {
        Vec::new()
    } else {
        vec![build(&collapsed)]
    }
}

fn items_of(record: &ElementRecord) -> impl Iterator<Item = String> + '_ {
    record
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|i| collapse_ws(i))
        .filter(|i| !i.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_for(record: &ElementRecord, suffix: &str) -> Vec<String> {
        let class = ElementClass::of(&record.tag);
        format_lines(record, &class, suffix)
    }

    #[test]
    fn test_heading_without_handler() {
        let record = ElementRecord::new("h2").with_text("Hello");
        assert_eq!(lines_for(&record, ""), vec!["## Hello"]);
    }

    #[test]
    fn test_heading_levels() {
        let record = ElementRecord::new("h1").with_text("Top");
        assert_eq!(lines_for(&record, ""), vec!["# Top"]);

        let record = ElementRecord::new("h6").with_text("Deep");
        assert_eq!(lines_for(&record, ""), vec!["###### Deep"]);
    }

    #[test]
    fn test_clickable_heading_gets_suffix() {
        let record = ElementRecord::new("h3").with_text("Expand").with_click_handler();
        assert_eq!(lines_for(&record, "$4"), vec!["### Expand$4"]);
    }

    #[test]
    fn test_inline_styles() {
        assert_eq!(lines_for(&ElementRecord::new("strong").with_text("bold"), ""), vec!["**bold**"]);
        assert_eq!(lines_for(&ElementRecord::new("b").with_text("bold"), ""), vec!["**bold**"]);
        assert_eq!(lines_for(&ElementRecord::new("em").with_text("it"), ""), vec!["*it*"]);
        assert_eq!(lines_for(&ElementRecord::new("i").with_text("it"), ""), vec!["*it*"]);
        assert_eq!(lines_for(&ElementRecord::new("mark").with_text("hl"), ""), vec!["`hl`"]);
        assert_eq!(lines_for(&ElementRecord::new("blockquote").with_text("q"), ""), vec!["> q"]);
    }

    #[test]
    fn test_anchor() {
        let mut record = ElementRecord::new("a").with_text("Go");
        record.href = Some("https://x.test/path".to_string());
        assert_eq!(lines_for(&record, "$2"), vec!["[Go](https://x.test/path)$2"]);
    }

    #[test]
    fn test_image_src_truncated_from_front() {
        let mut record = ElementRecord::new("img");
        record.src =
            Some("https://x.test/very/long/path/to/image-that-exceeds-threshold.png".to_string());
        record.alt = Some("".to_string());

        let lines = lines_for(&record, "$0");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("![Image](..."));
        assert!(lines[0].contains("image-that-exceeds-threshold.png"));
        assert!(!lines[0].contains("very/long"));
        assert!(lines[0].ends_with(")$0"));
    }

    #[test]
    fn test_image_alt_fallback() {
        let mut record = ElementRecord::new("img");
        record.src = Some("https://x.test/a.png".to_string());
        record.alt = Some("Logo".to_string());
        assert_eq!(lines_for(&record, "$1"), vec!["![Logo](https://x.test/a.png)$1"]);
    }

    #[test]
    fn test_input_format() {
        let mut record = ElementRecord::new("input");
        record.input_type = Some("email".to_string());
        record.placeholder = Some("you@example.com".to_string());
        record.label = Some("Email".to_string());
        assert_eq!(lines_for(&record, "$3"), vec!["?input:email[you@example.com](Email)$3"]);
    }

    #[test]
    fn test_textarea_format() {
        let mut record = ElementRecord::new("textarea").with_text("draft");
        record.label = Some("Message".to_string());
        assert_eq!(lines_for(&record, "$0"), vec!["?textarea[draft](Message)$0"]);
    }

    #[test]
    fn test_button_format() {
        let record = ElementRecord::new("button").with_text("Submit");
        assert_eq!(lines_for(&record, "$5"), vec!["?button[Submit]$5"]);
    }

    #[test]
    fn test_select_format() {
        let mut record = ElementRecord::new("select");
        record.options = Some(vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()]);
        record.label = Some("Color".to_string());
        assert_eq!(lines_for(&record, "$2"), vec!["?select[\"Red, Green, Blue\"](Color)$2"]);
    }

    #[test]
    fn test_table_rows() {
        let mut record = ElementRecord::new("table");
        record.rows = Some(vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["Ada".to_string(), "36".to_string()],
        ]);
        assert_eq!(lines_for(&record, ""), vec!["| Name | Age |", "| Ada | 36 |"]);
    }

    #[test]
    fn test_clickable_table_suffix_on_last_row() {
        let mut record = ElementRecord::new("table").with_click_handler();
        record.rows = Some(vec![vec!["a".to_string()], vec!["b".to_string()]]);
        assert_eq!(lines_for(&record, "$1"), vec!["| a |", "| b |$1"]);
    }

    #[test]
    fn test_bullet_list() {
        let mut record = ElementRecord::new("ul");
        record.items = Some(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(lines_for(&record, ""), vec!["- one", "- two"]);
    }

    #[test]
    fn test_numbered_list_one_based() {
        let mut record = ElementRecord::new("ol");
        record.items = Some(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(lines_for(&record, ""), vec!["1. first", "2. second"]);
    }

    #[test]
    fn test_preformatted_block() {
        let record = ElementRecord::new("pre").with_text("let x = 1;\nlet y = 2;");
        assert_eq!(lines_for(&record, ""), vec!["```", "let x = 1;", "let y = 2;", "```"]);
    }

    #[test]
    fn test_clickable_pre_suffix_on_closing_fence() {
        let record = ElementRecord::new("pre").with_text("code").with_click_handler();
        assert_eq!(lines_for(&record, "$7"), vec!["```", "code", "```$7"]);
    }

    #[test]
    fn test_generic_uses_direct_text_only() {
        let mut record = ElementRecord::new("div").with_text("outer inner");
        record.own_text = Some("outer".to_string());
        assert_eq!(lines_for(&record, ""), vec!["outer"]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let record = ElementRecord::new("p").with_text("   ");
        assert!(lines_for(&record, "").is_empty());

        let mut record = ElementRecord::new("div");
        record.own_text = Some("".to_string());
        assert!(lines_for(&record, "").is_empty());

        assert!(lines_for(&ElementRecord::new("script"), "").is_empty());
    }

    #[test]
    fn test_whitespace_collapsed_in_single_line_rules() {
        let record = ElementRecord::new("p").with_text("two\n  words");
        assert_eq!(lines_for(&record, ""), vec!["two words"]);
    }

    #[test]
    fn test_classify() {
        let anchor = ElementRecord::new("a");
        assert_eq!(classify(&anchor, &ElementClass::of("a")), Classification::Interactive);

        let div = ElementRecord::new("div").with_click_handler();
        assert_eq!(classify(&div, &ElementClass::of("div")), Classification::Clickable);

        let p = ElementRecord::new("p");
        assert_eq!(classify(&p, &ElementClass::of("p")), Classification::Plain);
    }

    #[test]
    fn test_truncate_url() {
        assert_eq!(truncate_url("short"), "short");
        let long = "https://example.com/a/very/long/path/segment/image.png";
        let truncated = truncate_url(long);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("image.png"));
        assert_eq!(truncated.chars().count(), URL_MAX_LEN + 3);
    }
}
