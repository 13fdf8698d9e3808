//! GraphQL transport for the indexer.
//!
//! One POST per call, no retries, no caching, no timeout of its own. Dropping
//! the returned future aborts the in-flight request.
//!
//! Responses are classified in a fixed order; the first matching rule wins:
//! 1. non-2xx status -> [`ZenlandError::Request`] (body is not parsed)
//! 2. envelope `errors` non-empty -> [`ZenlandError::GraphQl`], even with partial `data`
//! 3. no `data` -> [`ZenlandError::MissingData`]

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::normalize_base_url;
use crate::error::{Result, ZenlandError};

/// Executes a single GraphQL document and returns the envelope's `data`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphQlExecutor: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value>;
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

/// HTTP executor posting to `<base>/graphql`
#[derive(Clone)]
pub struct HttpGraphQlClient {
    http: Client,
    endpoint: String,
}

impl HttpGraphQlClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("zenland/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(http, base_url)
    }

    /// Use a preconfigured reqwest client (proxies, custom TLS, timeouts)
    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let endpoint = format!("{}/graphql", normalize_base_url(base_url)?);
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlExecutor for HttpGraphQlClient {
    #[instrument(skip_all, fields(op = operation_name(query)))]
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        debug!(endpoint = %self.endpoint, "posting GraphQL request");

        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&GraphQlRequest {
                query,
                variables: &variables,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = request_error(status, body);
            warn!("indexer request rejected: {}", err);
            return Err(err);
        }

        let body = resp.text().await?;
        decode_envelope(&body).map_err(|e| {
            warn!("indexer response rejected: {}", e);
            e
        })
    }
}

/// Classify a complete HTTP response.
pub fn classify_response(status: StatusCode, body: &str) -> Result<Value> {
    if !status.is_success() {
        return Err(request_error(status, body.to_string()));
    }
    decode_envelope(body)
}

fn request_error(status: StatusCode, body: String) -> ZenlandError {
    ZenlandError::Request {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    }
}

/// Validate a 2xx GraphQL envelope and return its `data`.
pub fn decode_envelope(body: &str) -> Result<Value> {
    let envelope: GraphQlResponse = serde_json::from_str(body)?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors
            .iter()
            .map(|e| {
                e.get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("GraphQL error")
                    .to_string()
            })
            .collect();
        return Err(ZenlandError::GraphQl { messages, errors });
    }

    match envelope.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(ZenlandError::MissingData),
    }
}

/// Execute `query` and decode `data` into `T`
pub async fn request<T, V>(executor: &dyn GraphQlExecutor, query: &str, variables: &V) -> Result<T>
where
    T: DeserializeOwned,
    V: Serialize + ?Sized,
{
    let variables = serde_json::to_value(variables)?;
    let data = executor.execute(query, variables).await?;
    Ok(serde_json::from_value(data)?)
}

/// Operation name from a document, e.g. `escrows` for `query escrows(...)`
pub fn operation_name(query: &str) -> &str {
    query
        .trim_start()
        .strip_prefix("query")
        .map(str::trim_start)
        .and_then(|rest| {
            rest.split(|c: char| c == '(' || c == '{' || c.is_whitespace())
                .next()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or("anonymous")
}
