//! Sport5 Fantasy — core client library: Google OAuth handshake, authenticated site session, and heuristic page extraction.

pub mod classifier;
pub mod client;
pub mod error;
pub mod extract;
pub mod oauth;
pub mod types;

pub use classifier::LoginClassifier;
pub use client::{FantasyClient, DEFAULT_BASE_URL};
pub use error::FantasyError;
pub use oauth::GoogleOAuth;
pub use types::*;
