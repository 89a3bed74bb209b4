use serde::{Deserialize, Serialize};

/// Header redacted by default.
pub const DEFAULT_SECRET_HEADER: &str = "authorization";

/// Query parameter redacted by default.
pub const DEFAULT_SECRET_PARAM: &str = "client_secret";

/// Names of the headers and query parameters whose values must never be rendered.
///
/// Matching is ASCII case-insensitive. Entries are kept in insertion order and
/// duplicates are harmless, they are not removed.
///
/// A policy can be loaded from configuration, missing fields fall back to the defaults:
///
/// ```rust
/// use httpdebug::RedactionPolicy;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let policy: RedactionPolicy = serde_json::from_str(r#"{ "secretParams": ["api_key"] }"#)?;
///
/// assert!(policy.is_secret_header("Authorization"));
/// assert!(policy.is_secret_param("API_KEY"));
/// assert!(!policy.is_secret_param("client_secret"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedactionPolicy {
    secret_headers: Vec<String>,
    secret_params: Vec<String>,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self {
            secret_headers: vec![DEFAULT_SECRET_HEADER.to_string()],
            secret_params: vec![DEFAULT_SECRET_PARAM.to_string()],
        }
    }
}

impl RedactionPolicy {
    /// Creates a policy without any secret, not even the defaults.
    pub fn empty() -> Self {
        Self {
            secret_headers: vec![],
            secret_params: vec![],
        }
    }

    /// Adds a header name to redact. An empty name is ignored.
    #[must_use]
    pub fn add_secret_header(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.secret_headers.push(name);
        }
        self
    }

    /// Adds a query parameter name to redact. An empty name is ignored.
    #[must_use]
    pub fn add_secret_param(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.secret_params.push(name);
        }
        self
    }

    /// Header names to redact, in insertion order.
    pub fn secret_headers(&self) -> &[String] {
        &self.secret_headers
    }

    /// Query parameter names to redact, in insertion order.
    pub fn secret_params(&self) -> &[String] {
        &self.secret_params
    }

    /// Returns `true` if the header value must be hidden.
    pub fn is_secret_header(&self, name: &str) -> bool {
        matches_any(&self.secret_headers, name)
    }

    /// Returns `true` if the query parameter value must be hidden.
    pub fn is_secret_param(&self, name: &str) -> bool {
        matches_any(&self.secret_params, name)
    }
}

fn matches_any(secrets: &[String], name: &str) -> bool {
    secrets
        .iter()
        .any(|secret| secret.eq_ignore_ascii_case(name))
}
