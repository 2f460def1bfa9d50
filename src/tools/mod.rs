//! Page operation tools
//!
//! Each boundary operation (navigate, read, click, fill, select) is a
//! [`Tool`]: typed parameters deserialized from JSON, executed against a
//! [`ToolContext`], returning a [`ToolResult`] that always carries a definite
//! success flag and a human-readable message. Failures the session reports
//! are folded into the result; they never propagate as faults.

pub mod click;
pub mod fill;
pub mod navigate;
pub mod read_page;
pub mod select;

pub use click::{ClickParams, ClickTool};
pub use fill::{FillParams, FillTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use read_page::{ReadPageParams, ReadPageTool};
pub use select::{SelectParams, SelectTool};

use crate::browser::PageSession;
use crate::error::{BrowserError, Result};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the operation succeeded
    pub success: bool,

    /// Structured payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Human-readable cause on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// A bare success
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    /// A success carrying a payload
    pub fn success_with(data: serde_json::Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// A failure with a cause
    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }

    /// Fold a session outcome into a result: the message of a successful
    /// action, or the error's rendering
    pub fn from_outcome(outcome: Result<String>) -> Self {
        match outcome {
            Ok(message) => Self::success_with(serde_json::json!({ "message": message })),
            Err(e) => Self::error(e.to_string()),
        }
    }

    /// The message a consumer should see, success or not
    pub fn message(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        match &self.data {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
            None => "Success".to_string(),
        }
    }
}

/// Execution context handed to every tool
pub struct ToolContext<'a> {
    /// The session the tool operates on
    pub session: &'a PageSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a PageSession) -> Self {
        Self { session }
    }
}

/// A page operation with typed parameters
pub trait Tool: Send + Sync + 'static {
    type Params: DeserializeOwned + JsonSchema;

    /// Name the tool is registered under
    fn name(&self) -> &str;

    /// Execute with already-deserialized parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON Schema of the parameters
    fn parameters_schema(&self) -> serde_json::Value {
        let schema = schemars::SchemaGenerator::default().into_root_schema_for::<Self::Params>();
        serde_json::to_value(schema).unwrap_or_default()
    }
}

/// Object-safe wrapper so tools with different parameter types can share a
/// registry
trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> serde_json::Value;
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> ErasedTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> serde_json::Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params: T::Params = serde_json::from_value(params)
            .map_err(|e| BrowserError::InvalidParams(format!("{}: {}", Tool::name(self), e)))?;
        self.execute_typed(params, context)
    }
}

/// Registry of tools, keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn ErasedTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all page operations registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(ReadPageTool);
        registry.register(ClickTool);
        registry.register(FillTool);
        registry.register(SelectTool);
        registry
    }

    /// Register a tool under its own name
    pub fn register<T: Tool>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Execute a tool by name with JSON parameters
    pub fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| BrowserError::UnknownTool(name.to_string()))?;
        tool.execute(params, context)
    }

    /// Names of all registered tools
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Parameter schema of a registered tool
    pub fn schema(&self, name: &str) -> Option<serde_json::Value> {
        self.tools.get(name).map(|t| t.parameters_schema())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_registers_all_operations() {
        let registry = ToolRegistry::with_defaults();
        let mut names = registry.names();
        names.sort();
        assert_eq!(names, vec!["click", "fill", "navigate", "read_page", "select"]);
    }

    #[test]
    fn test_schema_available_per_tool() {
        let registry = ToolRegistry::with_defaults();
        let schema = registry.schema("click").unwrap();
        assert!(schema.is_object());
        assert!(registry.schema("nope").is_none());
    }

    #[test]
    fn test_result_message_success() {
        let result = ToolResult::success_with(serde_json::json!({ "message": "Clicked on $3" }));
        assert!(result.success);
        assert_eq!(result.message(), "Clicked on $3");
    }

    #[test]
    fn test_result_message_error() {
        let result = ToolResult::error("Invalid element id: id 9 outside range 0..4");
        assert!(!result.success);
        assert!(result.message().contains("id 9"));
    }

    #[test]
    fn test_from_outcome() {
        let ok = ToolResult::from_outcome(Ok("Selected \"Blue\" from $2".to_string()));
        assert!(ok.success);
        assert_eq!(ok.message(), "Selected \"Blue\" from $2");

        let err = ToolResult::from_outcome(Err(BrowserError::InvalidId("id 7 outside range".into())));
        assert!(!err.success);
        assert!(err.message().contains("id 7"));
    }
}
