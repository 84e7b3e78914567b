//! HTTP plumbing shared by every resource client.
//!
//! All responses funnel through [`normalize`], so callers only ever see
//! parsed JSON or a [`ClientError::Api`] carrying a readable message.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::error::ErrorBody;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, Result};

/// Backend the admin talks to when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(api_base: &str) -> Result<Self> {
        Self::with_http(Client::new(), api_base)
    }

    pub fn with_http(http: Client, api_base: &str) -> Result<Self> {
        let base = Url::parse(api_base)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::UnusableBase(api_base.to_string()));
        }
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends `segments` to the base path and attaches `query` when it is
    /// non-empty.
    pub fn endpoint(&self, segments: &[&str], query: &[(&'static str, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        url
    }

    pub async fn get_json(&self, url: Url) -> Result<Value> {
        let request = self.http.get(url.clone());
        self.dispatch(request, &Method::GET, &url).await
    }

    /// Sends `body` as JSON (`Content-Type: application/json`).
    pub async fn send_json<B>(&self, method: Method, url: Url, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.request(method.clone(), url.clone()).json(body);
        self.dispatch(request, &method, &url).await
    }

    /// Sends a request without a body.
    pub async fn send_empty(&self, method: Method, url: Url) -> Result<Value> {
        let request = self.http.request(method.clone(), url.clone());
        self.dispatch(request, &method, &url).await
    }

    async fn dispatch(&self, request: RequestBuilder, method: &Method, url: &Url) -> Result<Value> {
        debug!(%method, %url, "sending api request");
        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Reads the body of `response` and hands it to [`normalize`].
///
/// A body that cannot be read on a failure status is treated as empty so the
/// caller still gets the `HTTP <status>` message.
pub async fn handle_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body = if status.is_success() {
        response.bytes().await?
    } else {
        response.bytes().await.unwrap_or_default()
    };
    normalize(status, &body)
}

pub fn normalize(status: StatusCode, body: &[u8]) -> Result<Value> {
    if status.is_success() {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_slice(body)?);
    }

    let message = failure_message(status, body);
    warn!(status = status.as_u16(), %message, "api request failed");
    Err(ClientError::Api { status, message })
}

fn failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
