// HTTP client module: a small blocking client for the depwatch API. The
// CLI drives one request at a time from interactive prompts, so blocking
// I/O keeps the call sites straightforward.

use std::env;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::auth::AuthStore;
use crate::error::{DepwatchError, DepwatchResult};
use crate::models::{ApiFailure, Envelope};

pub mod auth;
pub mod repo;
pub mod subscriber;

pub const API_HOST_ENV: &str = "API_HOST";
pub const DEFAULT_API_HOST: &str = "http://localhost:8081/";

/// API client holding a reqwest blocking client, the server's base URL
/// and a handle to the credential store. The access token is looked up
/// per request, so a login or `use` in the same run takes effect
/// immediately.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: AuthStore,
}

impl ApiClient {
    /// Client configured from the `API_HOST` environment variable, falling
    /// back to the local development server.
    pub fn from_env(auth: AuthStore) -> DepwatchResult<Self> {
        let base_url = env::var(API_HOST_ENV).unwrap_or_else(|_| DEFAULT_API_HOST.to_string());
        Self::new(base_url, auth)
    }

    pub fn new(base_url: impl Into<String>, auth: AuthStore) -> DepwatchResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            auth,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.endpoint(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.endpoint(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.endpoint(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.endpoint(path))
    }

    /// Send a request and decode the response envelope. The default user's
    /// access token, when one exists, goes out as a bearer header; without
    /// one the request is sent unauthenticated and the server answers 401.
    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> DepwatchResult<Envelope<T>> {
        let request = match self.auth.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(DepwatchError::from);
        }
        Err(parse_failure(status, &body))
    }
}

/// Turn a non-2xx response into an error, preferring the server's own
/// wording when the body is a well-formed failure envelope.
fn parse_failure(status: StatusCode, body: &str) -> DepwatchError {
    let message = match serde_json::from_str::<ApiFailure>(body) {
        Ok(failure) if !failure.message.is_empty() => failure.message,
        Ok(failure) if !failure.error.is_empty() => failure.error,
        _ => body.trim().to_string(),
    };
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };

    DepwatchError::Api {
        status: status.as_u16(),
        message,
    }
}
