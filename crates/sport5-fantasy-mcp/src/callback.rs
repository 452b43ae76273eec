//! Local OAuth redirect receiver.
//!
//! One axum route on a fixed local address receives the provider redirect,
//! forwards `code`/`state` to the pending handshake, and renders a static
//! HTML page for the human left in the browser tab. The listener is bound
//! at most once per process and shared by every subsequent handshake;
//! concurrent setups would collide on the port, which is a documented
//! limitation.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::session::FantasySessionManager;
use crate::types::{McpError, McpResult};

pub const CALLBACK_PATH: &str = "/oauth/callback";

/// Bind the listener and spawn the serve loop. Bind errors surface to the
/// caller; the spawned task then runs for the rest of the process.
pub async fn bind(
    addr: &str,
    session: Arc<Mutex<FantasySessionManager>>,
) -> McpResult<JoinHandle<()>> {
    let app = Router::new()
        .route(CALLBACK_PATH, get(handle_callback))
        .with_state(session);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(McpError::Io)?;

    tracing::info!("OAuth callback listener on http://{addr}{CALLBACK_PATH}");

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("OAuth callback listener failed: {e}");
        }
    }))
}

async fn handle_callback(
    State(session): State<Arc<Mutex<FantasySessionManager>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        return (StatusCode::BAD_REQUEST, "Missing parameters").into_response();
    };

    let mut session = session.lock().await;
    match session.complete_google_callback(code, state).await {
        Ok(identity) => {
            let who = identity.display_name().unwrap_or("your Google account");
            Html(success_page(who)).into_response()
        }
        Err(e) => {
            tracing::warn!("OAuth callback failed: {e}");
            Html(failure_page(&e.to_string())).into_response()
        }
    }
}

fn success_page(who: &str) -> String {
    format!(
        r#"<html>
    <body style="font-family: Arial; text-align: center; padding: 50px;">
        <h2>&#9989; Google login succeeded for {who}</h2>
        <p>You can close this tab and return to your assistant.</p>
        <script>window.close();</script>
    </body>
</html>"#
    )
}

fn failure_page(reason: &str) -> String {
    format!(
        r#"<html>
    <body style="font-family: Arial; text-align: center; padding: 50px;">
        <h2>&#10060; Login failed</h2>
        <p>{reason}</p>
    </body>
</html>"#
    )
}
