//! follower_extract tool implementation.
//!
//! Runs the follower count strategy chain over caller-supplied HTML.
//! No network I/O is performed.

use followcount_client::{ExtractionResult, extract};
use followcount_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for follower_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FollowerExtractParams {
    /// The raw HTML of a profile page.
    pub html: String,
}

/// Implementation of the follower_extract tool.
pub async fn extract_impl(params: FollowerExtractParams) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let result: ExtractionResult = extract(&params.html);
    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
