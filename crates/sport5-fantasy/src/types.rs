//! Core data types for identities, sessions, and extracted records.

use serde::{Deserialize, Serialize};

/// How the current site session was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Credentials,
    Google,
}

/// A verified identity returned by the Google userinfo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleIdentity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verified_email: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Any further provider-issued claims, kept verbatim.
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl GoogleIdentity {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.email.as_deref())
    }
}

/// A single roster entry scraped from the team page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub price: Option<String>,
}

/// Snapshot of the caller's team page.
///
/// Extraction is heuristic, so every field the page may not expose is
/// optional. Price, points, and budget are raw display strings, trimmed
/// of surrounding whitespace only.
#[derive(Debug, Clone, Serialize)]
pub struct TeamRecord {
    pub team_name: Option<String>,
    pub budget: Option<String>,
    pub points: Option<String>,
    pub players: Vec<Player>,
    pub login_method: LoginMethod,
}

/// One row of the league standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueRow {
    pub position: String,
    pub team_name: String,
    pub points: Option<String>,
}

/// Snapshot of the league standings page.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueTable {
    pub teams: Vec<LeagueRow>,
    pub login_method: LoginMethod,
}
