//! Tool registration and dispatch.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::Value;

use crate::session::FantasySessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{
    get_league_table, get_my_team, login_credentials, login_google, setup_google_oauth,
};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            setup_google_oauth::definition(),
            login_google::definition(),
            login_credentials::definition(),
            get_my_team::definition(),
            get_league_table::definition(),
        ]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        session: &Arc<Mutex<FantasySessionManager>>,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            "setup_google_oauth" => setup_google_oauth::execute(args, session).await,
            "login_google" => login_google::execute(args, session).await,
            "login_credentials" => login_credentials::execute(args, session).await,
            "get_my_team" => get_my_team::execute(args, session).await,
            "get_league_table" => get_league_table::execute(args, session).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
