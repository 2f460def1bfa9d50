//! Page snapshot module
//!
//! Turns the rendered DOM of a page into a line-oriented textual snapshot:
//! - ElementRecord: one batched observation of a DOM element
//! - ElementRegistry: ids for interactive/clickable elements, one pass at a time
//! - SnapshotBuilder: walks the observation, filters, formats, registers
//! - PageView: bounded windows over a snapshot's lines

pub mod builder;
pub mod element;
pub mod format;
pub mod registry;
pub mod window;

pub use builder::{PageDocument, Snapshot, SnapshotBuilder};
pub use element::{ElementClass, ElementRecord};
pub use format::Classification;
pub use registry::{ElementRef, ElementRegistry, REF_ATTRIBUTE};
pub use window::PageView;

use crate::error::{BrowserError, Result};
use headless_chrome::Tab;
use std::sync::Arc;

/// Capture a fresh snapshot from a tab.
///
/// The whole walk is one JavaScript round trip: the collection script stamps
/// id-bearing elements with `data-pm-ref="<epoch>-<n>"`, reads every attribute
/// the formatter needs, and returns the lot as JSON. The epoch ties the
/// stamped tokens to exactly this pass.
pub fn capture(tab: &Arc<Tab>, epoch: u64, max_lines: usize) -> Result<Snapshot> {
    let script = include_str!("collect_page.js").replace("__EPOCH__", &epoch.to_string());

    let result = tab
        .evaluate(&script, false)
        .map_err(|e| BrowserError::ConversionFailed(format!("page collection script: {}", e)))?;

    let value = result
        .value
        .ok_or_else(|| BrowserError::ConversionFailed("collection script returned no value".to_string()))?;

    let json: String = serde_json::from_value(value)
        .map_err(|e| BrowserError::ConversionFailed(format!("collection payload was not a string: {}", e)))?;

    let document: PageDocument = serde_json::from_str(&json)
        .map_err(|e| BrowserError::ConversionFailed(format!("could not parse page observation: {}", e)))?;

    Ok(SnapshotBuilder::new().max_lines(max_lines).build(document))
}
