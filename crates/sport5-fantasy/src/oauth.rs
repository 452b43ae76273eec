//! Google OAuth 2.0 authorization-code handshake.
//!
//! Three legs: mint an authorization URL carrying a fresh `state` nonce,
//! exchange the returned code for an access token, then fetch the verified
//! identity from the userinfo endpoint. A failure in any leg surfaces
//! immediately as a tagged error; there are no retries.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::error::FantasyError;
use crate::types::GoogleIdentity;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Entropy of the `state` nonce, before URL-safe encoding.
const STATE_BYTES: usize = 32;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// One Google OAuth handshake.
///
/// Only a single authorization may be pending at a time: minting a new URL
/// replaces the previous `state`, and a callback must echo the pending
/// value exactly or it is rejected outright.
pub struct GoogleOAuth {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: Url,
    userinfo_url: Url,
    state: Option<String>,
    access_token: Option<String>,
    user_info: Option<GoogleIdentity>,
    http: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, FantasyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: AUTH_URL.parse().expect("valid default URL"),
            token_url: TOKEN_URL.parse().expect("valid default URL"),
            userinfo_url: USERINFO_URL.parse().expect("valid default URL"),
            state: None,
            access_token: None,
            user_info: None,
            http,
        })
    }

    /// Point the handshake at non-Google endpoints (tests, self-hosted mocks).
    #[must_use]
    pub fn with_endpoints(mut self, auth_url: Url, token_url: Url, userinfo_url: Url) -> Self {
        self.auth_url = auth_url;
        self.token_url = token_url;
        self.userinfo_url = userinfo_url;
        self
    }

    /// Mint a fresh `state` and build the authorization URL.
    ///
    /// Replaces any previously pending state — only one outstanding
    /// handshake at a time.
    pub fn generate_auth_url(&mut self) -> String {
        let mut nonce = [0u8; STATE_BYTES];
        rand::thread_rng().fill_bytes(&mut nonce);
        let state = URL_SAFE_NO_PAD.encode(nonce);

        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", "openid email profile")
            .append_pair("response_type", "code")
            .append_pair("state", &state)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");

        self.state = Some(state);
        url.to_string()
    }

    /// Complete the handshake: check `state`, exchange the code for an
    /// access token, and fetch the verified identity.
    pub async fn handle_callback(
        &mut self,
        code: &str,
        state: &str,
    ) -> Result<GoogleIdentity, FantasyError> {
        if self.state.as_deref() != Some(state) {
            tracing::warn!("rejected OAuth callback with mismatched state");
            return Err(FantasyError::StateMismatch);
        }

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(FantasyError::TokenExchangeFailed(format!(
                "token endpoint returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.filter(|t| !t.is_empty()).ok_or_else(|| {
            FantasyError::TokenExchangeFailed(
                "token response carried no access_token".to_string(),
            )
        })?;

        let response = self
            .http
            .get(self.userinfo_url.clone())
            .bearer_auth(&access_token)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(FantasyError::UserInfoFetchFailed(
                response.status().as_u16(),
            ));
        }

        let identity: GoogleIdentity = response.json().await?;
        tracing::info!(email = ?identity.email, "Google identity verified");

        self.access_token = Some(access_token);
        self.user_info = Some(identity.clone());
        Ok(identity)
    }

    /// Identity from the last completed handshake, if any.
    pub fn identity(&self) -> Option<&GoogleIdentity> {
        self.user_info.as_ref()
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oauth() -> GoogleOAuth {
        GoogleOAuth::new("cid", "secret", "http://localhost:8000/oauth/callback").unwrap()
    }

    fn oauth_against(server: &MockServer) -> GoogleOAuth {
        oauth().with_endpoints(
            format!("{}/auth", server.uri()).parse().unwrap(),
            format!("{}/token", server.uri()).parse().unwrap(),
            format!("{}/userinfo", server.uri()).parse().unwrap(),
        )
    }

    fn state_param(auth_url: &str) -> String {
        Url::parse(auth_url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[test]
    fn test_auth_url_carries_expected_params() {
        let mut oauth = oauth();
        let url = Url::parse(&oauth.generate_auth_url()).unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("client_id"), Some("cid"));
        assert_eq!(get("scope"), Some("openid email profile"));
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(get("access_type"), Some("offline"));
        assert_eq!(get("prompt"), Some("consent"));
        // 32 random bytes, base64url without padding.
        assert_eq!(get("state").unwrap().len(), 43);
    }

    #[tokio::test]
    async fn test_state_mismatch_rejected_regardless_of_code() {
        let mut oauth = oauth();
        oauth.generate_auth_url();

        let err = oauth.handle_callback("a-valid-code", "not-the-state").await;
        assert!(matches!(err, Err(FantasyError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_callback_without_pending_state_rejected() {
        let mut oauth = oauth();
        let err = oauth.handle_callback("code", "anything").await;
        assert!(matches!(err, Err(FantasyError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_new_auth_url_invalidates_previous_state() {
        let mut oauth = oauth();
        let first = state_param(&oauth.generate_auth_url());
        let second = state_param(&oauth.generate_auth_url());
        assert_ne!(first, second);

        let err = oauth.handle_callback("code", &first).await;
        assert!(matches!(err, Err(FantasyError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_round_trip_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-1",
                "token_type": "Bearer",
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "108",
                "email": "ron@example.com",
                "verified_email": true,
                "name": "Ron Levi",
            })))
            .mount(&server)
            .await;

        let mut oauth = oauth_against(&server);
        let state = state_param(&oauth.generate_auth_url());

        let identity = oauth.handle_callback("the-code", &state).await.unwrap();
        assert_eq!(identity.email.as_deref(), Some("ron@example.com"));
        assert_eq!(identity.name.as_deref(), Some("Ron Levi"));
        assert_eq!(oauth.identity().unwrap().id.as_deref(), Some("108"));
    }

    #[tokio::test]
    async fn test_token_endpoint_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
            })))
            .mount(&server)
            .await;

        let mut oauth = oauth_against(&server);
        let state = state_param(&oauth.generate_auth_url());

        let err = oauth.handle_callback("expired-code", &state).await;
        assert!(matches!(err, Err(FantasyError::TokenExchangeFailed(_))));
    }

    #[tokio::test]
    async fn test_token_response_without_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
            })))
            .mount(&server)
            .await;

        let mut oauth = oauth_against(&server);
        let state = state_param(&oauth.generate_auth_url());

        let err = oauth.handle_callback("code", &state).await;
        assert!(matches!(err, Err(FantasyError::TokenExchangeFailed(_))));
    }

    #[tokio::test]
    async fn test_userinfo_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-1",
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut oauth = oauth_against(&server);
        let state = state_param(&oauth.generate_auth_url());

        let err = oauth.handle_callback("code", &state).await;
        assert!(matches!(err, Err(FantasyError::UserInfoFetchFailed(401))));
    }
}
