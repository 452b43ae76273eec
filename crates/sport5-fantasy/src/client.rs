//! Authenticated HTTP session against the fantasy site.
//!
//! One client owns one transport session: the cookie jar issued at login
//! is retained across calls and lives only in process memory.

use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::classifier::LoginClassifier;
use crate::error::FantasyError;
use crate::extract;
use crate::types::{GoogleIdentity, LeagueTable, LoginMethod, TeamRecord};

/// Production site root.
pub const DEFAULT_BASE_URL: &str = "https://fantasyleague.sport5.co.il";

const LOGIN_PATH: &str = "/login";
const TEAM_PATH: &str = "/my-team";
const LEAGUE_PATH: &str = "/league";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// One authenticated session against the fantasy site.
pub struct FantasyClient {
    http: reqwest::Client,
    base_url: Url,
    classifier: LoginClassifier,
    logged_in: bool,
    login_method: Option<LoginMethod>,
    user_data: Option<GoogleIdentity>,
}

impl FantasyClient {
    /// Session against the production site.
    pub fn new() -> Result<Self, FantasyError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Session against an alternate site root (tests, staging).
    pub fn with_base_url(base_url: &str) -> Result<Self, FantasyError> {
        Ok(Self {
            http: build_http()?,
            base_url: Url::parse(base_url)?,
            classifier: LoginClassifier::default(),
            logged_in: false,
            login_method: None,
            user_data: None,
        })
    }

    /// Swap the post-login success heuristic.
    #[must_use]
    pub fn with_classifier(mut self, classifier: LoginClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn login_method(&self) -> Option<LoginMethod> {
        self.login_method
    }

    /// Identity retained from a Google login, if that is how this session
    /// was authenticated.
    pub fn identity(&self) -> Option<&GoogleIdentity> {
        self.user_data.as_ref()
    }

    /// Log in with the site's own email/password form.
    ///
    /// Calling this again replaces the transport outright — the previous
    /// session's cookies are discarded, not merged.
    ///
    /// Success is judged by [`LoginClassifier`], a best-effort substring
    /// heuristic over the redirect target and response body; the site
    /// offers no stronger signal.
    pub async fn login_with_credentials(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<(), FantasyError> {
        self.http = build_http()?;
        self.logged_in = false;
        self.login_method = None;
        self.user_data = None;

        let login_url = self.base_url.join(LOGIN_PATH)?;

        let page = self.http.get(login_url.clone()).send().await?.text().await?;
        let csrf_token = extract::csrf_token(&page);
        if csrf_token.is_none() {
            tracing::debug!("login page carried no _token field");
        }

        let mut form: Vec<(&str, &str)> = vec![("email", email), ("password", password)];
        if let Some(token) = csrf_token.as_deref() {
            form.push(("_token", token));
        }

        let response = self.http.post(login_url).form(&form).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FantasyError::UnexpectedStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;

        if self.classifier.is_success(&final_url, &body) {
            self.logged_in = true;
            self.login_method = Some(LoginMethod::Credentials);
            tracing::info!("credential login accepted");
            Ok(())
        } else {
            tracing::warn!("credential login rejected by the site");
            Err(FantasyError::InvalidCredentials)
        }
    }

    /// Mark the session authenticated from a verified Google identity.
    ///
    /// Speculative path: whether the site honors Google-linked accounts is
    /// unverified. A non-empty email is the only gate; no site-side check
    /// is performed.
    pub fn login_with_google(&mut self, identity: &GoogleIdentity) -> Result<(), FantasyError> {
        match identity.email.as_deref() {
            Some(email) if !email.is_empty() => {
                self.logged_in = true;
                self.login_method = Some(LoginMethod::Google);
                self.user_data = Some(identity.clone());
                tracing::info!(email, "session marked authenticated via Google");
                Ok(())
            }
            _ => Err(FantasyError::MissingEmail),
        }
    }

    /// GET an authenticated page and return the raw body.
    ///
    /// Fails fast with [`FantasyError::NotLoggedIn`] before touching the
    /// network when the session is unauthenticated.
    pub async fn fetch_authenticated(&self, path: &str) -> Result<String, FantasyError> {
        if !self.logged_in {
            return Err(FantasyError::NotLoggedIn);
        }

        let url = self.base_url.join(path)?;
        let response = self.http.get(url).send().await?;
        Ok(response.text().await?)
    }

    /// Fetch and extract the caller's team page.
    pub async fn my_team(&self) -> Result<TeamRecord, FantasyError> {
        let method = self.login_method.ok_or(FantasyError::NotLoggedIn)?;
        let html = self.fetch_authenticated(TEAM_PATH).await?;
        Ok(extract::team(&html, method))
    }

    /// Fetch and extract the league standings.
    pub async fn league_table(&self) -> Result<LeagueTable, FantasyError> {
        let method = self.login_method.ok_or(FantasyError::NotLoggedIn)?;
        let html = self.fetch_authenticated(LEAGUE_PATH).await?;
        Ok(extract::league(&html, method))
    }
}

fn build_http() -> Result<reqwest::Client, FantasyError> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOGIN_FORM: &str = r#"
        <form method="post" action="/login">
            <input type="hidden" name="_token" value="tok-1">
            <input type="email" name="email">
            <input type="password" name="password">
        </form>
    "#;

    fn identity(email: Option<&str>) -> GoogleIdentity {
        GoogleIdentity {
            id: Some("108".to_string()),
            email: email.map(str::to_string),
            verified_email: Some(true),
            name: Some("Ron Levi".to_string()),
            picture: None,
            claims: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_invalid_credentials_leave_session_logged_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_FORM))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>Wrong email or password</p>"),
            )
            .mount(&server)
            .await;

        let mut client = FantasyClient::with_base_url(&server.uri()).unwrap();
        let err = client.login_with_credentials("a@b.com", "wrong").await;

        assert!(matches!(err, Err(FantasyError::InvalidCredentials)));
        assert!(!client.logged_in());
        assert_eq!(client.login_method(), None);
    }

    #[tokio::test]
    async fn test_login_echoes_csrf_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_FORM))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string_contains("_token=tok-1"))
            .and(body_string_contains("email=a%40b.com"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<div class=\"main\">Dashboard</div>"),
            )
            .mount(&server)
            .await;

        let mut client = FantasyClient::with_base_url(&server.uri()).unwrap();
        client.login_with_credentials("a@b.com", "pw").await.unwrap();

        assert!(client.logged_in());
        assert_eq!(client.login_method(), Some(LoginMethod::Credentials));
    }

    #[tokio::test]
    async fn test_login_succeeds_via_redirect_target() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<form></form>"))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", "/my-team"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/my-team"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>hello</h1>"))
            .mount(&server)
            .await;

        let mut client = FantasyClient::with_base_url(&server.uri()).unwrap();
        client.login_with_credentials("a@b.com", "pw").await.unwrap();
        assert!(client.logged_in());
    }

    #[tokio::test]
    async fn test_login_surfaces_http_failure_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<form></form>"))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut client = FantasyClient::with_base_url(&server.uri()).unwrap();
        let err = client.login_with_credentials("a@b.com", "pw").await;
        assert!(matches!(err, Err(FantasyError::UnexpectedStatus(500))));
        assert!(!client.logged_in());
    }

    #[tokio::test]
    async fn test_reads_before_login_perform_no_request() {
        let server = MockServer::start().await;

        let client = FantasyClient::with_base_url(&server.uri()).unwrap();

        assert!(matches!(
            client.fetch_authenticated("/my-team").await,
            Err(FantasyError::NotLoggedIn)
        ));
        assert!(matches!(client.my_team().await, Err(FantasyError::NotLoggedIn)));
        assert!(matches!(
            client.league_table().await,
            Err(FantasyError::NotLoggedIn)
        ));

        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_google_login_requires_email() {
        let mut client = FantasyClient::with_base_url("http://localhost:1").unwrap();

        assert!(matches!(
            client.login_with_google(&identity(None)),
            Err(FantasyError::MissingEmail)
        ));
        assert!(matches!(
            client.login_with_google(&identity(Some(""))),
            Err(FantasyError::MissingEmail)
        ));
        assert!(!client.logged_in());

        client.login_with_google(&identity(Some("ron@example.com"))).unwrap();
        assert!(client.logged_in());
        assert_eq!(client.login_method(), Some(LoginMethod::Google));
        assert_eq!(
            client.identity().and_then(|i| i.email.as_deref()),
            Some("ron@example.com")
        );
    }

    #[tokio::test]
    async fn test_team_fetch_and_extract() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/my-team"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<h1 class="team-name">Galaxy</h1>
                   <div class="player"><span class="name">Ron</span></div>"#,
            ))
            .mount(&server)
            .await;

        let mut client = FantasyClient::with_base_url(&server.uri()).unwrap();
        client.login_with_google(&identity(Some("ron@example.com"))).unwrap();

        let team = client.my_team().await.unwrap();
        assert_eq!(team.team_name.as_deref(), Some("Galaxy"));
        assert_eq!(team.players.len(), 1);
        assert_eq!(team.login_method, LoginMethod::Google);
    }
}
