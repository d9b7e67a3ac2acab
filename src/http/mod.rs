//! HTTP client module
//!
//! Provides the client used for login and endpoint checks.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest};
