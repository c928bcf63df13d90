//! The single-attempt fetch path shared by every endpoint.
//!
//! One GET, optional cache read/write, and normalization of every failure into
//! [`TfError::Request`]. Retries live one level up, in the builders.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::core::cache::CacheKey;
use crate::core::client::CacheMode;
use crate::core::error::{RequestErrorKind, normalize_message};
use crate::core::{TfClient, TfError};

/// A prepared GET request against one backend endpoint.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    path: &'static str,
    params: Vec<(&'static str, String)>,
    cache_key: CacheKey,
    freshness: Duration,
    cache_mode: CacheMode,
    fallback: String,
}

impl ApiRequest {
    pub(crate) fn get(path: &'static str, cache_key: CacheKey, fallback: impl Into<String>) -> Self {
        Self {
            path,
            params: Vec::new(),
            cache_key,
            freshness: Duration::ZERO,
            cache_mode: CacheMode::Use,
            fallback: fallback.into(),
        }
    }

    /// Set a query parameter; a repeated name replaces the earlier value.
    pub(crate) fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    pub(crate) fn freshness(mut self, dur: Duration) -> Self {
        self.freshness = dur;
        self
    }

    pub(crate) fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    fn url(&self, client: &TfClient) -> Result<Url, TfError> {
        let mut url = client.endpoint(self.path)?;
        if !self.params.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in &self.params {
                qp.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// Error bodies may carry a human-readable `message`.
#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// Perform `req` once and decode the JSON body into `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &TfClient,
    req: &ApiRequest,
) -> Result<T, TfError> {
    let url = req.url(client)?;

    if req.cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&req.cache_key, req.freshness).await
    {
        tracing::debug!(key = %req.cache_key, "cache hit");
        return decode(&body, &url, &req.fallback);
    }

    tracing::debug!(%url, "GET");
    let resp = client
        .http()
        .get(url.clone())
        .send()
        .await
        .map_err(|e| transport_error(&e, &url, &req.fallback))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(&e, &url, &req.fallback))?;

    if !status.is_success() {
        let server = serde_json::from_str::<ServerMessage>(&body)
            .ok()
            .and_then(|m| m.message);
        let transport = format!("request failed with status code {}", status.as_u16());
        return Err(TfError::Request {
            kind: RequestErrorKind::Status,
            status: Some(status.as_u16()),
            url: url.to_string(),
            message: normalize_message(server.as_deref(), Some(&transport), &req.fallback),
        });
    }

    let value = decode(&body, &url, &req.fallback)?;

    if req.cache_mode != CacheMode::Bypass {
        client.cache_put(&req.cache_key, &body, req.freshness).await;
    }

    Ok(value)
}

fn decode<T: DeserializeOwned>(body: &str, url: &Url, fallback: &str) -> Result<T, TfError> {
    serde_json::from_str(body).map_err(|e| {
        let detail = format!("unexpected response shape: {e}");
        TfError::Request {
            kind: RequestErrorKind::Decode,
            status: None,
            url: url.to_string(),
            message: normalize_message(None, Some(&detail), fallback),
        }
    })
}

fn transport_error(e: &reqwest::Error, url: &Url, fallback: &str) -> TfError {
    let kind = if e.is_timeout() {
        RequestErrorKind::Timeout
    } else {
        RequestErrorKind::Transport
    };
    TfError::Request {
        kind,
        status: e.status().map(|s| s.as_u16()),
        url: url.to_string(),
        message: normalize_message(None, Some(&e.to_string()), fallback),
    }
}
