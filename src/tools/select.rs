use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the select tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectParams {
    /// Id of the select element, as shown in the page text ($<id>)
    pub id: usize,

    /// Visible text of the option to select, matched exactly
    pub option_text: String,
}

/// Tool for choosing an option on a select element by id
#[derive(Default)]
pub struct SelectTool;

impl Tool for SelectTool {
    type Params = SelectParams;

    fn name(&self) -> &str {
        "select"
    }

    fn execute_typed(&self, params: SelectParams, context: &mut ToolContext) -> Result<ToolResult> {
        let outcome = context.session.select_option(params.id, &params.option_text);
        Ok(ToolResult::from_outcome(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_params() {
        let json = serde_json::json!({
            "id": 4,
            "option_text": "Blue"
        });

        let params: SelectParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.id, 4);
        assert_eq!(params.option_text, "Blue");
    }

    #[test]
    fn test_select_params_require_option_text() {
        let json = serde_json::json!({
            "id": 4
        });

        assert!(serde_json::from_value::<SelectParams>(json).is_err());
    }

    #[test]
    fn test_select_tool_metadata() {
        let tool = SelectTool;
        assert_eq!(tool.name(), "select");
        assert!(tool.parameters_schema().is_object());
    }
}
