//! # pagemark
//!
//! Render live web pages as line-oriented markdown for AI agents, and act on
//! them by id, via the Chrome DevTools Protocol (CDP).
//!
//! ## How it works
//!
//! Every rendering pass walks the visible DOM and serializes each element
//! into one or more text lines. Interactive elements (links, images, inputs,
//! textareas, buttons, selects) and anything with a click handler get a
//! `$<id>` suffix; the agent refers back to those ids to click, fill, or
//! select. Ids are valid until the next navigation or rendering pass.
//!
//! ```text
//! url: https://example.com/
//! title: Example Domain
//! # Example Domain
//! This domain is for use in illustrative examples in documents.
//! [More information...](https://www.iana.org/domains/example)$0
//! ---
//! Showing lines 0 to 3 of 3
//! ```
//!
//! ## MCP Server
//!
//! The recommended way to use this library is via the Model Context Protocol
//! (MCP) server, which exposes the page operations to AI agents like Claude:
//!
//! ```bash
//! # Run headless browser
//! cargo run --bin mcp-server
//!
//! # Run with visible browser (useful for debugging)
//! cargo run --bin mcp-server -- --headed
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use pagemark::{PageSession, LaunchOptions};
//!
//! # fn main() -> pagemark::Result<()> {
//! let session = PageSession::launch(LaunchOptions::default())?;
//!
//! session.navigate("https://example.com")?;
//! session.refresh_snapshot(0)?;
//!
//! // Page as line-oriented markdown, ids included
//! println!("{}", session.page_view(0, 0)?);
//!
//! // Act on element $0, then re-render
//! println!("{}", session.click(0, false)?);
//! session.refresh_snapshot(0)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust,no_run
//! use pagemark::{PageSession, LaunchOptions};
//! use serde_json::json;
//!
//! # fn main() -> pagemark::Result<()> {
//! let session = PageSession::launch(LaunchOptions::default())?;
//!
//! let result = session.execute_tool("navigate", json!({"url": "example.com"}))?;
//! println!("{}", result.message());
//!
//! let result = session.execute_tool("click", json!({"id": 0}))?;
//! println!("{}", result.message());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`snapshot`]: DOM walking, line formatting, element ids, windowing
//! - [`tools`]: Page operations (navigate, read_page, click, fill, select)
//! - [`error`]: Error types and result alias
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature) - **Start here for AI integration**

pub mod browser;
pub mod error;
pub mod snapshot;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{ConnectionOptions, LaunchOptions, PageSession};
pub use error::{BrowserError, Result};
pub use snapshot::{ElementRegistry, PageView, Snapshot, SnapshotBuilder};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::PageServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
