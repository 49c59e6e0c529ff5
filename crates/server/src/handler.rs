//! MCP server handler implementation.
//!
//! This module defines the server handler that routes tool calls to the
//! follower lookup and extraction implementations.
use std::sync::Arc;

use crate::lookup::LookupService;
use crate::tools::{FollowerCountParams, FollowerExtractParams, count_impl, extract_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The MCP server handler for followcount.
#[derive(Clone)]
pub struct FollowCountServer {
    tool_router: ToolRouter<Self>,
    service: Arc<LookupService>,
}

#[tool_router]
impl FollowCountServer {
    /// Create a new server handler backed by `service`.
    pub fn new(service: Arc<LookupService>) -> Self {
        Self { tool_router: Self::tool_router(), service }
    }

    /// Look up a profile's follower count.
    ///
    /// Served from cache when a fresh result exists; otherwise the profile
    /// page is fetched and run through the extraction chain.
    #[tool(
        description = "Look up the follower count of a profile. Returns followers (null when unknown), a status of found/not_found/unavailable, and the strategy that matched."
    )]
    async fn follower_count(&self, params: Parameters<FollowerCountParams>) -> Result<CallToolResult, McpError> {
        count_impl(&self.service, params.0).await
    }

    /// Extract a follower count from raw HTML.
    ///
    /// No network requests are made.
    #[tool(description = "Extract a follower count from profile page HTML. Returns count and source, both null when nothing matched.")]
    async fn follower_extract(&self, params: Parameters<FollowerExtractParams>) -> Result<CallToolResult, McpError> {
        extract_impl(params.0).await
    }
}

impl ServerHandler for FollowCountServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "followcount".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
