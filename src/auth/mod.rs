//! Login against the API under test
//!
//! A successful login yields a bearer [`Credential`]. Every failure is
//! reported as an [`AuthError`]; callers decide whether to continue without
//! a credential.

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::CheckerConfig;
use crate::http::{HttpClient, HttpError, HttpRequest};
use crate::models::Credential;

/// Login failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("login rejected with status {0}")]
    Rejected(u16),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("login response is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("login response has no token field")]
    MissingToken,
}

/// Performs the single login call of a run
pub struct Authenticator<'a> {
    client: &'a HttpClient,
    login_path: &'a str,
    email: &'a str,
    password: &'a str,
}

impl<'a> Authenticator<'a> {
    pub fn new(client: &'a HttpClient, config: &'a CheckerConfig) -> Self {
        Self {
            client,
            login_path: &config.login_path,
            email: &config.email,
            password: &config.password,
        }
    }

    /// Log in and extract the bearer token
    pub async fn login(&self) -> Result<Credential, AuthError> {
        debug!("Logging in as {}", self.email);

        let request = HttpRequest::post(self.login_path).json(&json!({
            "email": self.email,
            "password": self.password,
        }));

        let response = self.client.send(request).await?;
        if !response.is_success() {
            return Err(AuthError::Rejected(response.status_code));
        }

        let token = extract_token(&response.body)?;
        info!("Authenticated as {}", self.email);
        Ok(Credential::bearer(token))
    }
}

fn extract_token(body: &str) -> Result<String, AuthError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AuthError::MalformedBody(e.to_string()))?;

    value
        .get("token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AuthError::MissingToken)
}
