//! Configuration resolution: explicit flag > environment > default.

const DEFAULT_CALLBACK_ADDR: &str = "127.0.0.1:8000";

/// Must match the redirect URI registered with the Google OAuth client.
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/oauth/callback";

/// Resolved runtime configuration for one server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Fantasy-site root.
    pub base_url: String,
    /// Local address the OAuth callback listener binds.
    pub callback_addr: String,
    /// Redirect URI the identity provider sends the browser back to.
    pub redirect_uri: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

impl ServerConfig {
    pub fn resolve(
        base_url: Option<&str>,
        callback_addr: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Self {
        Self {
            base_url: resolve(base_url, "SPORT5_BASE_URL", sport5_fantasy::DEFAULT_BASE_URL),
            callback_addr: resolve(callback_addr, "SPORT5_OAUTH_ADDR", DEFAULT_CALLBACK_ADDR),
            redirect_uri: resolve(redirect_uri, "SPORT5_REDIRECT_URI", DEFAULT_REDIRECT_URI),
        }
    }
}

fn resolve(explicit: Option<&str>, env_key: &str, default: &str) -> String {
    if let Some(value) = explicit {
        return value.to_string();
    }

    if let Ok(value) = std::env::var(env_key) {
        return value;
    }

    default.to_string()
}
