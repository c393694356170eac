//! Provides the asynchronous client for the charging-station booking API.
//!
//! Every operation funnels through [`ApiClient::request`], which attaches the
//! bearer token, serializes the body, parses the reply as JSON and turns
//! non-2xx statuses into [`AppError::Api`].

use crate::config::ClientConfig;
use crate::error::{AppError, Result, FALLBACK_API_MESSAGE};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

/// Placeholder body type for calls that send no payload.
pub(crate) const NO_BODY: Option<&()> = None;

/// An asynchronous client for the booking backend.
///
/// Cloning is cheap and shares the connection pool; the token is fixed at
/// construction and sent with every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl ApiClient {
    /// Creates a client from an explicit configuration.
    ///
    /// No request timeout is set; a hung request waits on the transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_http_client(client: Client, config: ClientConfig) -> Self {
        // A missing token is sent as the literal string "null".
        let authorization = format!("Bearer {}", config.token.as_deref().unwrap_or("null"));
        Self {
            client,
            base_url: config.base_url,
            authorization,
        }
    }

    /// Base URL every endpoint is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues `method` against `base_url + endpoint` and decodes the JSON reply into `T`.
    ///
    /// `body`, when present, is sent as its JSON serialization; `None`, JSON `null`
    /// and the empty string send no payload.
    /// The reply is parsed as JSON even on failure, so a non-JSON body yields
    /// [`AppError::JsonParse`] whatever the status.
    pub async fn request<T, B>(&self, endpoint: &str, method: Method, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(method, endpoint, &[], body).await
    }

    /// Same as [`ApiClient::request`] but returns the parsed JSON untouched.
    pub async fn request_value(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.request(endpoint, method, body).await
    }

    pub(crate) async fn execute<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, has_body = body.is_some(), "Sending API request");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.authorization.as_str());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(payload) = body.map(serde_json::to_vec).transpose()? {
            // A null or empty-string body counts as absent; field order is kept as serialized.
            if !is_blank_payload(&payload) {
                builder = builder.body(payload);
            }
        }

        let response = builder.send().await.map_err(|e| {
            error!("{} {} failed before a response arrived: {}", method, url, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                "{} {} returned status {} with a body that is not JSON: {}",
                method, url, status, e
            );
            AppError::from(e)
        })?;

        if !status.is_success() {
            let message = api_error_message(&data);
            error!("{} {} failed with status {}: {}", method, url, status, message);
            return Err(AppError::Api { status, message });
        }

        debug!(%method, %url, %status, "API request succeeded");
        Ok(serde_json::from_value(data)?)
    }
}

fn is_blank_payload(payload: &[u8]) -> bool {
    payload == b"null" || payload == b"\"\""
}

/// Picks the message of a failed response: `error`, else `message`, else the fallback.
///
/// Null, `false`, `0` and empty strings do not count as a message.
pub(crate) fn api_error_message(data: &Value) -> String {
    ["error", "message"]
        .iter()
        .find_map(|field| data.get(*field).and_then(message_text))
        .unwrap_or_else(|| FALLBACK_API_MESSAGE.to_string())
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
