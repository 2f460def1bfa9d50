use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the fill tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FillParams {
    /// Id of the input or textarea, as shown in the page text ($<id>)
    pub id: usize,

    /// Value to put into the element
    pub value: String,

    /// Press Enter after filling (submits most search boxes and forms)
    #[serde(default)]
    pub press_enter: bool,
}

/// Tool for filling an input or textarea by id
#[derive(Default)]
pub struct FillTool;

impl Tool for FillTool {
    type Params = FillParams;

    fn name(&self) -> &str {
        "fill"
    }

    fn execute_typed(&self, params: FillParams, context: &mut ToolContext) -> Result<ToolResult> {
        let outcome = context.session.fill_in(params.id, &params.value, params.press_enter);
        Ok(ToolResult::from_outcome(outcome))
    }
}
