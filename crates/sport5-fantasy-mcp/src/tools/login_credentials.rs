//! Tool: login_credentials — email/password login against the fantasy site.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::FantasySessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct LoginParams {
    email: String,
    password: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "login_credentials".to_string(),
        description: Some("Log in to the Sport5 fantasy site with email and password".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "email": { "type": "string", "description": "Account email address" },
                "password": { "type": "string", "description": "Account password" }
            },
            "required": ["email", "password"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<FantasySessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: LoginParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut mgr = session.lock().await;
    match mgr.login_credentials(&params.email, &params.password).await {
        Ok(()) => Ok(ToolCallResult::json(&json!({
            "success": true,
            "message": "Login succeeded",
            "login_method": "credentials",
        }))),
        Err(e) => Ok(ToolCallResult::error(format!("Login failed: {e}"))),
    }
}
