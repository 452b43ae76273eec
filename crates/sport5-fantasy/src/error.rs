//! Error taxonomy for the OAuth handshake and the site session.

/// All errors surfaced by this library.
#[derive(Debug, thiserror::Error)]
pub enum FantasyError {
    /// The callback `state` did not match the last minted value.
    #[error("OAuth state mismatch — the callback does not belong to the pending login")]
    StateMismatch,

    #[error("failed to exchange the authorization code for an access token: {0}")]
    TokenExchangeFailed(String),

    #[error("userinfo endpoint returned HTTP {0}")]
    UserInfoFetchFailed(u16),

    /// The verified identity carried no email address.
    #[error("the Google account did not provide an email address")]
    MissingEmail,

    #[error("not logged in — call login_with_credentials or login_with_google first")]
    NotLoggedIn,

    #[error("invalid credentials — the site did not accept the login")]
    InvalidCredentials,

    #[error("login endpoint returned HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
