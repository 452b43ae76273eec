//! Tool: get_my_team — fetch and extract the caller's team page.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::{json, Value};

use crate::session::FantasySessionManager;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_my_team".to_string(),
        description: Some(
            "Get the logged-in user's team: name, players, budget, and points".to_string(),
        ),
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

    match mgr.my_team().await {
        Ok(team) => Ok(ToolCallResult::json(&team)),
        Err(e) => Ok(ToolCallResult::error(format!(
            "Could not fetch the team page: {e}"
        ))),
    }
}
