//! HTTP clients for the supported services.

pub mod linkding;
pub mod miniflux;
pub mod wallabag;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;
use std::time::Duration;

/// Timeout applied to every request.
const TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
const USER_AGENT: &str = concat!("mlwcli/", env!("CARGO_PKG_VERSION"));

/// Longest error body echoed back to the user.
const MAX_ERROR_BODY: usize = 200;

fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
    })
}

/// Request payload.
pub(crate) enum Body<'a> {
    Empty,
    Json(JsonValue),
    Form(&'a [(&'a str, &'a str)]),
}

/// A service base URL plus the header that authenticates against it.
#[derive(Clone)]
pub(crate) struct Endpoint {
    base: String,
    auth: Option<(&'static str, String)>,
}

impl Endpoint {
    pub(crate) fn new(base: &str) -> Self {
        Endpoint {
            base: base.trim().trim_end_matches('/').to_string(),
            auth: None,
        }
    }

    /// Attach an auth header sent with every request.
    pub(crate) fn with_auth(mut self, header: &'static str, value: String) -> Self {
        self.auth = Some((header, value));
        self
    }

    /// Full URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Start a request to `path`.
    pub(crate) fn request(&self, method: &str, path: &str) -> ureq::Request {
        let request = agent().request(method, &self.url(path));
        match &self.auth {
            Some((header, value)) => request.set(header, value),
            None => request,
        }
    }

    /// Send a request and decode its JSON response.
    pub(crate) fn fetch<T: DeserializeOwned>(&self, request: ureq::Request, body: Body) -> Result<T> {
        let text = send(request, body)?;
        serde_json::from_str(&text).map_err(|e| {
            Error::Network(format!("Invalid JSON from {}: {}", self.base, e))
        })
    }
}

/// Send a request and return its body text.
pub(crate) fn send(request: ureq::Request, body: Body) -> Result<String> {
    let method = request.method().to_string();
    let url = request.url().to_string();
    tracing::debug!(%method, %url, "sending request");

    let result = match body {
        Body::Empty => request.call(),
        Body::Json(value) => request
            .set("Content-Type", "application/json")
            .send_string(&value.to_string()),
        Body::Form(fields) => request.send_form(fields),
    };

    match result {
        Ok(response) => {
            tracing::debug!(status = response.status(), %url, "received response");
            response
                .into_string()
                .map_err(|e| Error::Network(format!("Failed to read response from {}: {}", url, e)))
        }
        Err(ureq::Error::Status(status, response)) => {
            tracing::debug!(status, %url, "request failed");
            let text = response.into_string().unwrap_or_default();
            Err(Error::Api {
                status,
                message: error_message(&text),
            })
        }
        Err(ureq::Error::Transport(transport)) => Err(Error::Network(format!(
            "Failed to connect to {}: {}",
            url, transport
        ))),
    }
}

/// Pull a readable message out of an error response body.
fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<JsonValue>(body) {
        // miniflux, linkding, wallabag oauth
        for key in ["error_message", "detail", "error_description", "error"] {
            if let Some(message) = json.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_string();
    }
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Split a space-separated tag string.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_slash() {
        let endpoint = Endpoint::new(" https://links.example.com/ ");
        assert_eq!(
            endpoint.url("/api/bookmarks/"),
            "https://links.example.com/api/bookmarks/"
        );
    }

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(
            error_message(r#"{"error_message": "access unauthorized"}"#),
            "access unauthorized"
        );
        assert_eq!(
            error_message(r#"{"detail": "Invalid token."}"#),
            "Invalid token."
        );
        assert_eq!(
            error_message(r#"{"error": "invalid_grant", "error_description": "Invalid username and password combination"}"#),
            "Invalid username and password combination"
        );
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("  Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), "empty response");

        let long = "x".repeat(500);
        let message = error_message(&long);
        assert_eq!(message.len(), MAX_ERROR_BODY + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("cool  useful "), vec!["cool", "useful"]);
        assert!(split_tags("").is_empty());
    }
}
