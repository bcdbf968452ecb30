//! Outbound HTTP helpers for scripts
//!
//! The engine only decides which base URL and headers apply; the calls
//! themselves carry no retry or timeout logic of their own.

use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use std::env;

use crate::context::DocGoContext;
use crate::error::DocGoError;

/// Default port of the local sibling-process dispatcher
const DEFAULT_MCP_PORT: &str = "9000";

impl DocGoContext {
    /// Call an external API relative to the configured base URL.
    ///
    /// The base URL resolves through the precedence chain under
    /// `api_base_url`, then the `API_BASE_URL` environment variable; an
    /// unresolvable base fails before any network attempt. Extra headers
    /// come from the JSON object in `API_HEADERS`.
    pub async fn call_api(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let base_url = self
            .resolve("api_base_url")
            .or_else(|| env::var("API_BASE_URL").ok())
            .ok_or(DocGoError::ApiBaseUrlMissing)?;
        let url = format!("{}{}", base_url, endpoint);

        let mut request = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json");
        for (name, value) in extra_headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(DocGoError::ApiCallFailed {
                status: response.status(),
            }
            .into());
        }
        Ok(response.json().await?)
    }

    /// Invoke a function of a sibling app through the local MCP dispatcher
    pub async fn call_app(&self, app: &str, function: &str, params: &[Value]) -> Result<Value> {
        let port = env::var("MCP_PORT").unwrap_or_else(|_| DEFAULT_MCP_PORT.to_string());
        let url = format!("http://localhost:{}/mcp/execute", port);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "app": app,
                "function": function,
                "params": params,
            }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DocGoError::AppCallFailed {
                status: response.status(),
            }
            .into());
        }
        Ok(response.json().await?)
    }
}

/// String-valued headers from the API_HEADERS environment variable,
/// expected to hold a JSON object. Anything unparseable is ignored.
fn extra_headers() -> Vec<(String, String)> {
    let raw = match env::var("API_HEADERS") {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    let parsed: Value = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(_) => return Vec::new(),
    };
    match parsed.as_object() {
        Some(obj) => obj
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
        None => Vec::new(),
    }
}
