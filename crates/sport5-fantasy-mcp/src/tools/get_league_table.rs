//! Tool: get_league_table — fetch and extract the league standings.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::{json, Value};

use crate::session::FantasySessionManager;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_league_table".to_string(),
        description: Some("Get the league standings table".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub async fn execute(
    _args: Value,
    session: &Arc<Mutex<FantasySessionManager>>,
) -> McpResult<ToolCallResult> {
    let mgr = session.lock().await;
    if !mgr.logged_in() {
        return Ok(ToolCallResult::error(
            "Not logged in. Call login_credentials or login_google first.".to_string(),
        ));
    }

    match mgr.league_table().await {
        Ok(table) => Ok(ToolCallResult::json(&table)),
        Err(e) => Ok(ToolCallResult::error(format!(
            "Could not fetch the league page: {e}"
        ))),
    }
}
