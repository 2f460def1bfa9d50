use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the click tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickParams {
    /// Id of the element, as shown in the page text ($<id>)
    pub id: usize,

    /// Double-click instead of a single click
    #[serde(default)]
    pub double: bool,
}

/// Tool for clicking an element by id
#[derive(Default)]
pub struct ClickTool;

impl Tool for ClickTool {
    type Params = ClickParams;

    fn name(&self) -> &str {
        "click"
    }

    fn execute_typed(&self, params: ClickParams, context: &mut ToolContext) -> Result<ToolResult> {
        let outcome = context.session.click(params.id, params.double);
        Ok(ToolResult::from_outcome(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_params_single() {
        let json = serde_json::json!({
            "id": 5
        });

        let params: ClickParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.id, 5);
        assert!(!params.double);
    }

    #[test]
    fn test_click_params_double() {
        let json = serde_json::json!({
            "id": 0,
            "double": true
        });

        let params: ClickParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.id, 0);
        assert!(params.double);
    }

    #[test]
    fn test_click_params_reject_negative_id() {
        let json = serde_json::json!({
            "id": -1
        });

        assert!(serde_json::from_value::<ClickParams>(json).is_err());
    }

    #[test]
    fn test_click_tool_metadata() {
        let tool = ClickTool;
        assert_eq!(tool.name(), "click");
        assert!(tool.parameters_schema().is_object());
    }
}
