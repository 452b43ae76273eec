//! Tool: setup_google_oauth — configure the Google OAuth handshake.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::callback;
use crate::session::FantasySessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct SetupParams {
    client_id: String,
    client_secret: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "setup_google_oauth".to_string(),
        description: Some(
            "Configure Google OAuth with a client ID and secret, and start the local callback listener"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "client_id": { "type": "string", "description": "Google OAuth client ID" },
                "client_secret": { "type": "string", "description": "Google OAuth client secret" }
            },
            "required": ["client_id", "client_secret"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<FantasySessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: SetupParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut mgr = session.lock().await;
    if let Err(e) = mgr.configure_oauth(&params.client_id, &params.client_secret) {
        return Ok(ToolCallResult::error(format!(
            "Could not configure Google OAuth: {e}"
        )));
    }

    // The listener is started on first setup and then shared for the rest
    // of the process; a reconfigured handshake reuses it.
    if !mgr.listener_running() {
        let addr = mgr.config().callback_addr.clone();
        match callback::bind(&addr, Arc::clone(session)).await {
            Ok(handle) => mgr.set_listener(handle),
            Err(e) => {
                return Ok(ToolCallResult::error(format!(
                    "Could not start the OAuth callback listener on {addr}: {e}"
                )));
            }
        }
    }

    Ok(ToolCallResult::text(
        "Google OAuth configured. Use login_google to sign in.".to_string(),
    ))
}
