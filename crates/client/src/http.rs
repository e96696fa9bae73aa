//! Request plumbing shared by every endpoint wrapper.
//!
//! All requests go through [`BackendClient::request`], which attaches the
//! bearer token when one is set. Replies are accepted either wrapped in a
//! `{ "data": ... }` envelope or bare.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tourism_core::image_url::ResolveImages;

use crate::error::{ClientError, ClientResult};

/// HTTP client for the tourism backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("authorized", &self.token.is_some())
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// * `timeout` - per-request timeout applied to every call.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url: Arc::from(trimmed),
            token: None,
        })
    }

    /// An authorized copy of this client. Every request it builds carries
    /// `Authorization: Bearer <token>`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: Arc::clone(&self.base_url),
            token: Some(Arc::from(token.into())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Whether the backend answers at all. Any HTTP reply counts.
    pub async fn ping(&self) -> bool {
        match self.http.get(self.url("/")).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, base_url = %self.base_url, "Backend unreachable");
                false
            }
        }
    }

    // ---- response handling ----

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let response = Self::ensure_success(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(error = %e, "Backend reply did not match the expected shape");
            ClientError::Decode(e)
        })?;
        Ok(envelope.into_inner())
    }

    /// Send and decode, then resolve image URLs against the backend base.
    pub(crate) async fn send_resolved<T: DeserializeOwned + ResolveImages>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let mut value: T = self.send_json(builder).await?;
        value.resolve_images(&self.base_url);
        Ok(value)
    }

    pub(crate) async fn send_unit(&self, builder: reqwest::RequestBuilder) -> ClientResult<()> {
        Self::ensure_success(builder.send().await?).await?;
        Ok(())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_resolved<T: DeserializeOwned + ResolveImages>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        self.send_resolved(self.request(Method::GET, path).query(query))
            .await
    }

    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::warn!(status = status.as_u16(), path = %url, "Backend returned an error");

        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
