//! follower_count tool implementation.
//!
//! Looks up a profile's follower count through the shared lookup service,
//! using the same cache as the HTTP endpoint.

use followcount_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lookup::LookupService;

/// Input parameters for follower_count tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FollowerCountParams {
    /// Profile handle, with or without a leading `@`.
    /// Falls back to the configured default handle when omitted.
    #[serde(default)]
    pub user: Option<String>,

    /// Include the fetched URL, detected strategy and a page snippet.
    #[serde(default)]
    pub debug: bool,
}

/// Implementation of the follower_count tool.
///
/// Lookup failures are part of the report, so this only errors if the report
/// cannot be serialized.
pub async fn count_impl(service: &LookupService, params: FollowerCountParams) -> Result<CallToolResult, McpError> {
    let report = service.lookup(params.user.as_deref(), params.debug).await;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize report: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
