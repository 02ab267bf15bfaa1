use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::Config;

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Blocking executor for a single GraphQL endpoint.
///
/// Every request carries the bearer token from [`Config::token`].
pub struct GraphqlClient {
    http: Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghstats/", env!("CARGO_PKG_VERSION"))),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", cfg.token.expose()))
            .context("token contains characters not allowed in a header")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
        })
    }

    /// POST `{query, variables}` and return the decoded body.
    ///
    /// # Errors
    /// - Transport failure (connection refused, TLS, ...).
    /// - Any non-success status; the message carries the status code and the query text.
    /// - A body that is not JSON.
    ///
    /// GraphQL `errors` inside a 200 response are not inspected here.
    pub fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": query, "variables": variables });
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            bail!(
                "query failed with status {}: {}",
                status.as_u16(),
                query.trim()
            );
        }
        let body: Value = resp.json().context("response body is not valid JSON")?;
        Ok(body)
    }

    /// Run `query` and decode its `data` member into `T`.
    pub fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let body = self.execute(query, variables)?;
        let raw: RawResponse =
            serde_json::from_value(body).context("response is not a GraphQL result")?;

        let data = match raw.data {
            Some(d) if !d.is_null() => d,
            _ if raw.errors.is_empty() => bail!("response has no data"),
            _ => bail!("response has no data: {}", join_messages(&raw.errors)),
        };

        serde_json::from_value(data).with_context(|| {
            if raw.errors.is_empty() {
                "unexpected response shape".to_string()
            } else {
                format!("unexpected response shape ({})", join_messages(&raw.errors))
            }
        })
    }
}
