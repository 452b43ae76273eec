//! Error types and JSON-RPC error codes for the MCP server.

use sport5_fantasy::FantasyError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP and server-specific error codes.
pub mod mcp_error_codes {
    pub const TOOL_NOT_FOUND: i32 = -32803;

    /// A tool that reads the site was called before any successful login.
    pub const LOGIN_REQUIRED: i32 = -32850;
    /// Google OAuth has not been configured with setup_google_oauth yet.
    pub const OAUTH_NOT_CONFIGURED: i32 = -32851;
    /// Upstream failure at the fantasy site or the identity provider.
    pub const SITE_ERROR: i32 = -32852;
}

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Not logged in — call login_credentials or login_google first")]
    LoginRequired,

    #[error("Google OAuth is not configured — call setup_google_oauth first")]
    OAuthNotConfigured,

    #[error("{0}")]
    Site(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) => INTERNAL_ERROR,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::LoginRequired => LOGIN_REQUIRED,
            McpError::OAuthNotConfigured => OAUTH_NOT_CONFIGURED,
            McpError::Site(_) => SITE_ERROR,
            McpError::Io(_) => INTERNAL_ERROR,
            McpError::Json(_) => PARSE_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<FantasyError> for McpError {
    fn from(e: FantasyError) -> Self {
        match e {
            FantasyError::NotLoggedIn => McpError::LoginRequired,
            other => McpError::Site(other.to_string()),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;
