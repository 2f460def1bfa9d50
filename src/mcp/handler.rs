use crate::browser::{LaunchOptions, PageSession};
use rmcp::{
    ServerHandler, tool_handler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
};
use std::sync::Arc;

/// MCP server exposing one browser page to agents
#[derive(Clone)]
pub struct PageServer {
    session: Arc<PageSession>,
    tool_router: ToolRouter<PageServer>,
}

impl PageServer {
    /// Create a server with a default headless browser
    pub fn new() -> crate::error::Result<Self> {
        Self::with_options(LaunchOptions::default())
    }

    /// Create a server with custom browser launch options
    pub fn with_options(options: LaunchOptions) -> crate::error::Result<Self> {
        Ok(Self {
            session: Arc::new(PageSession::launch(options)?),
            tool_router: Self::tool_router(),
        })
    }

    /// The session all tools operate on
    pub(crate) fn session(&self) -> Arc<PageSession> {
        self.session.clone()
    }
}

#[tool_handler]
impl ServerHandler for PageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Browse the web as text. page_navigate renders a page as lines; \
                 interactive elements end with $<id>. Act on them with page_click, \
                 page_fill and page_select, then call page_read with refresh=true \
                 to see the result. Ids are only valid for the latest rendering."
                    .to_string(),
            ),
        }
    }
}
