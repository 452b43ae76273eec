//! Tool: login_google — open a browser for the Google sign-in.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::{json, Value};

use crate::session::FantasySessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "login_google".to_string(),
        description: Some(
            "Log in via Google OAuth — opens a browser for the consent screen".to_string(),
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
    let mut mgr = session.lock().await;
    let auth_url = match mgr.begin_google_login() {
        Ok(url) => url,
        Err(McpError::OAuthNotConfigured) => {
            return Ok(ToolCallResult::error(
                "Google OAuth is not configured yet. Call setup_google_oauth first.".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };
    drop(mgr);

    match open::that(&auth_url) {
        Ok(()) => Ok(ToolCallResult::text(format!(
            "A browser window was opened for the Google sign-in.\n\
             If nothing opened, go to: {auth_url}\n\n\
             After approving, return here — the login completes in the background."
        ))),
        Err(e) => {
            tracing::warn!("could not open a browser: {e}");
            Ok(ToolCallResult::text(format!(
                "Could not open a browser automatically.\nGo to: {auth_url}"
            )))
        }
    }
}
