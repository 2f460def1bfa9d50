use serde::Deserialize;

/// One observed DOM element, as reported by the page collection script.
///
/// All attribute and text reads for an element are batched into this single
/// record, so the Rust side never has to issue per-attribute round trips.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementRecord {
    /// Lowercase tag name (e.g. "a", "input", "div")
    pub tag: String,

    /// Rendered box width in CSS pixels (offsetWidth)
    pub width: f64,

    /// Rendered box height in CSS pixels (offsetHeight)
    pub height: f64,

    /// Computed style visibility is "hidden"
    pub hidden: bool,

    /// A click or dblclick handler is bound on the element
    pub clickable: bool,

    /// Rendered inner text, trimmed
    pub text: String,

    /// Ref token stamped onto the live node as `data-pm-ref`, present for
    /// every element that can consume an identifier
    pub r#ref: Option<String>,

    /// Resolved `href` (anchors)
    pub href: Option<String>,

    /// Resolved `src` (images)
    pub src: Option<String>,

    /// `alt` text (images)
    pub alt: Option<String>,

    /// Input type (inputs)
    pub input_type: Option<String>,

    /// Placeholder text (inputs)
    pub placeholder: Option<String>,

    /// Inner text of the immediately preceding sibling (inputs, textareas, selects)
    pub label: Option<String>,

    /// Option texts in document order (selects)
    pub options: Option<Vec<String>>,

    /// Cell texts per row (tables)
    pub rows: Option<Vec<Vec<String>>>,

    /// Item texts in document order (lists)
    pub items: Option<Vec<String>>,

    /// Concatenation of the element's direct text-node children, trimmed
    pub own_text: Option<String>,
}

impl ElementRecord {
    /// Create a record for the given tag with everything else defaulted
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Default::default() }
    }

    /// Whether the element would be visible to a human user: positive
    /// rendered box and computed visibility not `hidden`.
    ///
    /// Invisible elements are skipped entirely; they emit no line and
    /// consume no identifier.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && !self.hidden
    }

    /// Builder method: mark the record visible with a nominal box
    pub fn visible(mut self) -> Self {
        self.width = 100.0;
        self.height = 20.0;
        self
    }

    /// Builder method: set inner text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method: set the stamped ref token
    pub fn with_ref(mut self, token: impl Into<String>) -> Self {
        self.r#ref = Some(token.into());
        self
    }

    /// Builder method: mark a click/dblclick handler as bound
    pub fn with_click_handler(mut self) -> Self {
        self.clickable = true;
        self
    }
}

/// Closed classification of a tag, computed once per element and matched
/// exhaustively by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementClass {
    Heading(u8),
    Paragraph,
    Strong,
    Emphasis,
    Mark,
    Blockquote,
    Preformatted,
    Table,
    BulletList,
    NumberedList,
    Anchor,
    Image,
    Input,
    TextArea,
    Button,
    Select,
    /// No dedicated rule; emits its direct text-node children
    Generic,
    /// Non-content machinery (scripts, styles, metadata); never emits
    Skipped,
}

impl ElementClass {
    /// Classify a lowercase tag name
    pub fn of(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "strong" | "b" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "mark" => Self::Mark,
            "blockquote" => Self::Blockquote,
            "pre" => Self::Preformatted,
            "table" => Self::Table,
            "ul" => Self::BulletList,
            "ol" => Self::NumberedList,
            "a" => Self::Anchor,
            "img" => Self::Image,
            "input" => Self::Input,
            "textarea" => Self::TextArea,
            "button" => Self::Button,
            "select" => Self::Select,
            "script" | "style" | "noscript" | "template" | "meta" | "link" | "area" => Self::Skipped,
            _ => Self::Generic,
        }
    }

    /// Whether the tag is intrinsically actionable and always consumes an id
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Anchor | Self::Image | Self::Input | Self::TextArea | Self::Button | Self::Select
        )
    }
}
