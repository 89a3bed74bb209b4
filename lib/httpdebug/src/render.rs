//! Rendering of a request as a `curl` command.
//!
//! The output looks like:
//!
//! ```text
//! curl -X POST \
//!   https://api.example.com/users?client_secret=REDACTED&page=1 \
//!   -H 'authorization: <REDACTED>' \
//!   -H 'content-type: application/json' \
//!   -d '{"name":"Bob"}'
//! ```
//!
//! Header lines are sorted on their rendered text, so the output does not depend
//! on the [`HeaderMap`] iteration order.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::mem;

use bytes::Bytes;
use http::{HeaderMap, Uri};
use http_body_util::BodyExt;
use url::form_urlencoded;

use crate::{HttpDebugError, RedactionPolicy, Request};

/// Separator between two lines of the rendered command.
pub const LINE_SEPARATOR: &str = " \\\n  ";

/// Replacement for a secret query parameter value.
pub const REDACTED_PARAM: &str = "REDACTED";

/// Replacement for a secret header value.
pub const REDACTED_HEADER: &str = "<REDACTED>";

/// Renders the request as a `curl` command, hiding the secrets listed in the policy.
///
/// If a body is attached, it is fully read then put back on the request as a new
/// buffered body with the same bytes, so the request can still be sent.
///
/// Header names are rendered in lower case: [`HeaderMap`] normalizes them, so a
/// header inserted as `Accept` shows up as `-H 'accept: ...'`.
///
/// # Errors
///
/// Returns [`HttpDebugError::BodyRead`] if the body stream fails. In that case no
/// command is produced and the request is left without body.
pub async fn render(
    request: &mut Request,
    policy: &RedactionPolicy,
) -> Result<String, HttpDebugError> {
    let mut lines = vec![
        format!("curl -X {}", request.method()),
        sanitize_url(Some(request.uri()), policy),
    ];

    lines.extend(render_headers(request.headers(), policy));

    if let Some(body) = drain_body(request).await? {
        let body = String::from_utf8_lossy(&body);
        lines.push(format!("-d '{}'", escape_single_quote(&body)));
    }

    Ok(lines.join(LINE_SEPARATOR))
}

/// Escapes every single quote with a backslash.
///
/// ```rust
/// use httpdebug::render::escape_single_quote;
///
/// assert_eq!(escape_single_quote("I'd like that"), r"I\'d like that");
/// ```
pub fn escape_single_quote(value: &str) -> Cow<'_, str> {
    if value.contains('\'') {
        Cow::Owned(value.replace('\'', r"\'"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Renders the URI with the secret query parameter values replaced by `REDACTED`.
///
/// When a parameter is redacted, the whole query is re-encoded with its keys sorted.
/// Otherwise the URI is rendered as is. A missing URI renders as an empty string.
pub fn sanitize_url(uri: Option<&Uri>, policy: &RedactionPolicy) -> String {
    let Some(uri) = uri else {
        return String::new();
    };
    let Some(query) = uri.query() else {
        return uri.to_string();
    };

    let mut params = BTreeMap::<String, Vec<String>>::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    let mut redacted = false;
    for (key, values) in &mut params {
        if policy.is_secret_param(key) && values.iter().any(|value| !value.is_empty()) {
            *values = vec![REDACTED_PARAM.to_string()];
            redacted = true;
        }
    }
    if !redacted {
        return uri.to_string();
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    let query = serializer.finish();

    let mut result = String::new();
    if let Some(scheme) = uri.scheme_str() {
        result.push_str(scheme);
        result.push_str("://");
    }
    if let Some(authority) = uri.authority() {
        result.push_str(authority.as_str());
    }
    result.push_str(uri.path());
    result.push('?');
    result.push_str(&query);
    result
}

fn render_headers(headers: &HeaderMap, policy: &RedactionPolicy) -> Vec<String> {
    let mut lines = headers
        .keys()
        .map(|name| {
            let key = escape_single_quote(name.as_str());
            if policy.is_secret_header(name.as_str()) {
                return format!("-H '{key}: {REDACTED_HEADER}'");
            }
            let values = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("-H '{key}: {}'", escape_single_quote(&values))
        })
        .collect::<Vec<_>>();

    lines.sort();
    lines
}

async fn drain_body(request: &mut Request) -> Result<Option<Bytes>, HttpDebugError> {
    if request.body().as_bytes().is_some_and(<[u8]>::is_empty) {
        return Ok(None);
    }

    let body = mem::replace(request.body_mut(), reqwest::Body::from(Bytes::new()));
    let bytes = body
        .collect()
        .await
        .map_err(|source| HttpDebugError::BodyRead { source })?
        .to_bytes();

    *request.body_mut() = reqwest::Body::from(bytes.clone());
    Ok(Some(bytes))
}
