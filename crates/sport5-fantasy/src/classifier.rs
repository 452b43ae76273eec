//! Post-login success classification.
//!
//! The fantasy site has no machine-readable "login succeeded" signal; the
//! only observable evidence is the redirect target and the returned markup.
//! The heuristic lives here as a named strategy so it can be swapped or
//! tested apart from the transport. Best-effort, not a contract with the
//! site.

/// Substring oracle for a successful credential login: the final URL
/// contains the post-login path fragment, or the body contains the
/// dashboard marker (case-insensitive).
#[derive(Debug, Clone)]
pub struct LoginClassifier {
    path_fragment: String,
    body_marker: String,
}

impl Default for LoginClassifier {
    fn default() -> Self {
        Self::new("my-team", "dashboard")
    }
}

impl LoginClassifier {
    pub fn new(path_fragment: impl Into<String>, body_marker: impl Into<String>) -> Self {
        Self {
            path_fragment: path_fragment.into(),
            body_marker: body_marker.into().to_lowercase(),
        }
    }

    /// Whether the login response looks like a logged-in landing page.
    pub fn is_success(&self, final_url: &str, body: &str) -> bool {
        final_url.contains(&self.path_fragment) || body.to_lowercase().contains(&self.body_marker)
    }
}
