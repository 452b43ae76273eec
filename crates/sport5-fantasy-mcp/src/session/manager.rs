//! Process-lifetime session state.
//!
//! One manager instance is created by `main`, wrapped in `Arc<Mutex<…>>`,
//! and handed to the protocol handler, every tool, and the callback
//! listener — there is no global registry. It holds at most one OAuth
//! handshake and at most one site session at a time; each new login
//! replaces the previous state rather than merging into it. Nothing is
//! persisted; dropping the manager drops the cookies and tokens with it.

use tokio::task::JoinHandle;

use sport5_fantasy::{
    FantasyClient, GoogleIdentity, GoogleOAuth, LeagueTable, TeamRecord,
};

use crate::config::ServerConfig;
use crate::types::{McpError, McpResult};

pub struct FantasySessionManager {
    config: ServerConfig,
    oauth: Option<GoogleOAuth>,
    client: Option<FantasyClient>,
    listener: Option<JoinHandle<()>>,
}

impl FantasySessionManager {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            oauth: None,
            client: None,
            listener: None,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Replace any previous handshake with a freshly configured one.
    pub fn configure_oauth(&mut self, client_id: &str, client_secret: &str) -> McpResult<()> {
        let oauth = GoogleOAuth::new(client_id, client_secret, self.config.redirect_uri.as_str())?;
        self.oauth = Some(oauth);
        tracing::info!("Google OAuth configured");
        Ok(())
    }

    pub fn oauth_configured(&self) -> bool {
        self.oauth.is_some()
    }

    /// Whether the callback listener task has been started.
    pub fn listener_running(&self) -> bool {
        self.listener.is_some()
    }

    /// Record the callback listener handle. The task is started once and
    /// left running for the process lifetime.
    pub fn set_listener(&mut self, handle: JoinHandle<()>) {
        self.listener = Some(handle);
    }

    /// Mint the authorization URL for a fresh handshake attempt.
    pub fn begin_google_login(&mut self) -> McpResult<String> {
        let oauth = self.oauth.as_mut().ok_or(McpError::OAuthNotConfigured)?;
        Ok(oauth.generate_auth_url())
    }

    /// Complete the handshake, then log the site session in with the
    /// verified identity.
    pub async fn complete_google_callback(
        &mut self,
        code: &str,
        state: &str,
    ) -> McpResult<GoogleIdentity> {
        let oauth = self.oauth.as_mut().ok_or(McpError::OAuthNotConfigured)?;
        let identity = oauth.handle_callback(code, state).await?;

        let mut client = FantasyClient::with_base_url(&self.config.base_url)?;
        client.login_with_google(&identity)?;
        self.client = Some(client);

        Ok(identity)
    }

    /// Replace the site session and log in with credentials.
    ///
    /// The previous session is discarded even when the new login fails.
    pub async fn login_credentials(&mut self, email: &str, password: &str) -> McpResult<()> {
        let mut client = FantasyClient::with_base_url(&self.config.base_url)?;
        let result = client.login_with_credentials(email, password).await;
        self.client = Some(client);
        result.map_err(McpError::from)
    }

    pub fn logged_in(&self) -> bool {
        self.client.as_ref().is_some_and(FantasyClient::logged_in)
    }

    pub async fn my_team(&self) -> McpResult<TeamRecord> {
        let client = self.client.as_ref().ok_or(McpError::LoginRequired)?;
        Ok(client.my_team().await?)
    }

    pub async fn league_table(&self) -> McpResult<LeagueTable> {
        let client = self.client.as_ref().ok_or(McpError::LoginRequired)?;
        Ok(client.league_table().await?)
    }
}
