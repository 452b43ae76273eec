//! Sport5 Fantasy MCP Server — fantasy-league access for assistant hosts.

pub mod callback;
pub mod config;
pub mod protocol;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use protocol::ProtocolHandler;
pub use session::FantasySessionManager;
pub use transport::StdioTransport;
