//! Endpoint descriptors and the credential attached to protected ones
//!
//! The checklist is a fixed, ordered table. Order only matters for output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the checklist
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// Whether requests with this method carry an (empty) JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One endpoint to check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
    pub description: &'static str,
    pub protected: bool,
}

impl Endpoint {
    const fn new(
        method: HttpMethod,
        path: &'static str,
        description: &'static str,
        protected: bool,
    ) -> Self {
        Self {
            method,
            path,
            description,
            protected,
        }
    }

    /// The reference checklist, in execution order
    pub fn all() -> &'static [Endpoint] {
        ENDPOINTS
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

static ENDPOINTS: &[Endpoint] = &[
    Endpoint::new(HttpMethod::Get, "/authors", "Get authors list", false),
    Endpoint::new(HttpMethod::Get, "/categories", "Get categories", false),
    Endpoint::new(HttpMethod::Get, "/tags", "Get tags list", true),
    Endpoint::new(HttpMethod::Get, "/logs", "Get activity logs", true),
    Endpoint::new(HttpMethod::Get, "/articles", "Get user articles", true),
    Endpoint::new(HttpMethod::Get, "/articles/public", "Get public articles", false),
    Endpoint::new(HttpMethod::Get, "/latest-articles", "Get latest articles", false),
];

/// Bearer credential obtained from login.
///
/// An absent credential yields no headers, so protected endpoints are then
/// requested unauthenticated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    token: Option<String>,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.token.is_some()
    }

    /// Short form of the token for display
    pub fn preview(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(|t| t.chars().take(20).collect::<String>())
    }

    /// Headers this credential grants
    pub fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(token) = &self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        headers
    }

    /// Headers to send for `endpoint`: the credential's only when protected
    pub fn headers_for(&self, endpoint: &Endpoint) -> HashMap<String, String> {
        if endpoint.protected {
            self.headers()
        } else {
            HashMap::new()
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &self.token.as_ref().map(|_| "********"))
            .finish()
    }
}
