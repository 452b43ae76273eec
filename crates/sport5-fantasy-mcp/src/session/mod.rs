//! Session management for the fantasy-site login and OAuth handshake.

pub mod manager;

pub use manager::FantasySessionManager;
