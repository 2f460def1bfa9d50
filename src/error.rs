use thiserror::Error;

/// Errors that can occur during browser automation and page rendering
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out
    #[error("Could not navigate to page: {0}")]
    NavigationFailed(String),

    /// Tab-level operation (create, close, query) failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// The DOM walk or line formatting failed
    #[error("Could not convert page: {0}")]
    ConversionFailed(String),

    /// Element id is negative, out of range, or belongs to a superseded snapshot
    #[error("Invalid element id: {0}")]
    InvalidId(String),

    /// The registry resolved the id but the live element is gone
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The underlying click/fill/select call failed
    #[error("Could not {action}: {reason}")]
    ActionFailed { action: String, reason: String },

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool parameters did not match the expected schema
    #[error("Invalid tool parameters: {0}")]
    InvalidParams(String),
}

impl BrowserError {
    /// Shorthand for an [`BrowserError::ActionFailed`] with an owned action name
    pub fn action_failed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ActionFailed { action: action.into(), reason: reason.into() }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BrowserError>;
