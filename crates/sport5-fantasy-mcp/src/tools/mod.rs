//! MCP tool implementations.

pub mod get_league_table;
pub mod get_my_team;
pub mod login_credentials;
pub mod login_google;
pub mod registry;
pub mod setup_google_oauth;

pub use registry::ToolRegistry;
