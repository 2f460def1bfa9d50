//! MCP (Model Context Protocol) server for page reading and interaction
//!
//! This module exposes the page operation tools to MCP clients by wrapping
//! the internal tool implementations.

pub mod handler;
pub use handler::PageServer;

use crate::tools::{ToolContext, ToolResult as InternalToolResult};
use rmcp::{
    tool_router, tool,
    ErrorData as McpError,
    model::{CallToolResult, Content},
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Navigate tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// URL to navigate to
    pub url: String,
    /// Cap on the number of page lines returned (default: 0 = no cap)
    #[serde(default)]
    pub max_lines: usize,
}

/// Read page tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadPageParams {
    /// First line of the window (default: 0)
    #[serde(default)]
    pub from_line: usize,
    /// End of the window, exclusive; 0 means "to the end"
    #[serde(default)]
    pub to_line: usize,
    /// Re-render the page before reading; ids are re-assigned
    #[serde(default)]
    pub refresh: bool,
}

/// Click tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickParams {
    /// Element id from the page text ($<id>)
    pub id: usize,
    /// Double-click instead of single click
    #[serde(default)]
    pub double: bool,
}

/// Fill tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FillParams {
    /// Element id from the page text ($<id>)
    pub id: usize,
    /// Value to put into the input or textarea
    pub value: String,
    /// Press Enter after filling
    #[serde(default)]
    pub press_enter: bool,
}

/// Select tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectParams {
    /// Element id from the page text ($<id>)
    pub id: usize,
    /// Visible text of the option to select
    pub option_text: String,
}

/// Convert internal ToolResult to MCP CallToolResult.
///
/// Failures become error results with the cause as text, never protocol
/// faults, so the calling agent always sees a definite outcome.
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = result
            .data
            .as_ref()
            .and_then(|d| d.get("page").and_then(|p| p.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| result.message());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        Ok(CallToolResult::error(vec![Content::text(result.message())]))
    }
}

#[tool_router]
impl PageServer {
    /// Navigate to a URL
    #[tool(description = "Navigate to a URL and return the page as line-oriented markdown. Interactive elements end with $<id>; use the id with the click/fill/select tools")]
    fn page_navigate(
        &self,
        params: Parameters<NavigateParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&session);

        let tool_params = serde_json::json!({
            "url": params.0.url,
            "max_lines": params.0.max_lines
        });

        let result = session.tool_registry()
            .execute("navigate", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Read a window of the current page
    #[tool(description = "Read lines [from_line, to_line) of the current page. Set refresh after an action that changed the page; ids are re-assigned on refresh")]
    fn page_read(
        &self,
        params: Parameters<ReadPageParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&session);

        let tool_params = serde_json::json!({
            "from_line": params.0.from_line,
            "to_line": params.0.to_line,
            "refresh": params.0.refresh
        });

        let result = session.tool_registry()
            .execute("read_page", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Click on an element
    #[tool(description = "Click (or double-click) the element with the given id")]
    fn page_click(
        &self,
        params: Parameters<ClickParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&session);

        let tool_params = serde_json::json!({
            "id": params.0.id,
            "double": params.0.double
        });

        let result = session.tool_registry()
            .execute("click", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Fill an input field
    #[tool(description = "Fill the input or textarea with the given id, optionally pressing Enter")]
    fn page_fill(
        &self,
        params: Parameters<FillParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&session);

        let tool_params = serde_json::json!({
            "id": params.0.id,
            "value": params.0.value,
            "press_enter": params.0.press_enter
        });

        let result = session.tool_registry()
            .execute("fill", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Select a dropdown option
    #[tool(description = "Select the option with the given visible text on the select element with the given id")]
    fn page_select(
        &self,
        params: Parameters<SelectParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&session);

        let tool_params = serde_json::json!({
            "id": params.0.id,
            "option_text": params.0.option_text
        });

        let result = session.tool_registry()
            .execute("select", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }
}
