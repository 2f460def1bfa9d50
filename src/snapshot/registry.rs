use crate::error::{BrowserError, Result};
use indexmap::IndexMap;

/// Attribute the collection script stamps onto id-bearing elements
pub const REF_ATTRIBUTE: &str = "data-pm-ref";

/// Locator for one registered element: the stamped ref token plus the tag
/// name, kept for human-readable action messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    /// Value of the stamped `data-pm-ref` attribute (`<epoch>-<n>`)
    pub token: String,

    /// Lowercase tag name
    pub tag: String,
}

impl ElementRef {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { token: token.into(), tag: tag.into() }
    }

    /// CSS selector that finds the live element by its stamped attribute
    pub fn selector(&self) -> String {
        format!("[{}=\"{}\"]", REF_ATTRIBUTE, self.token)
    }
}

/// Map from snapshot-local identifiers to element locators.
///
/// Ids are allocated sequentially from 0 within one builder pass; the
/// registry is the single bridge between the `$<id>` suffixes an agent sees
/// and the live elements actions must touch. Exactly one registry is live
/// per session at any time.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    /// Map from id to locator, insertion-ordered
    map: IndexMap<usize, ElementRef>,

    /// Next id to hand out
    next_id: usize,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self { map: IndexMap::new(), next_id: 0 }
    }

    /// Register an element and return its assigned id
    pub fn allocate(&mut self, element: ElementRef) -> usize {
        let id = self.next_id;
        self.map.insert(id, element);
        self.next_id += 1;
        id
    }

    /// Resolve an id to its locator, bounds-checked against this pass.
    ///
    /// Validity is `0 <= id < len()`; anything else is rejected before any
    /// driver call is attempted.
    pub fn resolve(&self, id: usize) -> Result<&ElementRef> {
        if id >= self.next_id {
            return Err(BrowserError::InvalidId(format!(
                "id {} outside range 0..{} of the current snapshot",
                id, self.next_id
            )));
        }
        self.map.get(&id).ok_or_else(|| {
            BrowserError::ElementNotFound(format!("no element registered under id {}", id))
        })
    }

    /// Check whether an id is valid for this pass
    pub fn is_valid(&self, id: usize) -> bool {
        id < self.next_id && self.map.contains_key(&id)
    }

    /// Number of allocated ids
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no ids were allocated
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all (id, locator) pairs in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (&usize, &ElementRef)> {
        self.map.iter()
    }
}
