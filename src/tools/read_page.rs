use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the read_page tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadPageParams {
    /// First line of the window (inclusive)
    #[serde(default)]
    pub from_line: usize,

    /// Last line of the window (exclusive); 0 means "to the end"
    #[serde(default)]
    pub to_line: usize,

    /// Re-render the page before reading. Set after a click, fill, or select
    /// that may have changed the page; element ids are re-assigned.
    #[serde(default)]
    pub refresh: bool,
}

/// Tool for reading a window of the rendered page
#[derive(Default)]
pub struct ReadPageTool;

impl Tool for ReadPageTool {
    type Params = ReadPageParams;

    fn name(&self) -> &str {
        "read_page"
    }

    fn execute_typed(&self, params: ReadPageParams, context: &mut ToolContext) -> Result<ToolResult> {
        if params.refresh {
            if let Err(e) = context.session.refresh_snapshot(0) {
                return Ok(ToolResult::error(e.to_string()));
            }
        }

        match context.session.page_view(params.from_line, params.to_line) {
            Ok(page) => Ok(ToolResult::success_with(serde_json::json!({ "page": page }))),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_page_params_defaults() {
        let json = serde_json::json!({});

        let params: ReadPageParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.from_line, 0);
        assert_eq!(params.to_line, 0);
        assert!(!params.refresh);
    }

    #[test]
    fn test_read_page_params_window() {
        let json = serde_json::json!({
            "from_line": 40,
            "to_line": 80,
            "refresh": true
        });

        let params: ReadPageParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.from_line, 40);
        assert_eq!(params.to_line, 80);
        assert!(params.refresh);
    }

    #[test]
    fn test_read_page_tool_metadata() {
        let tool = ReadPageTool;
        assert_eq!(tool.name(), "read_page");
        assert!(tool.parameters_schema().is_object());
    }
}
