//! wxhelper HTTP transport
//!
//! One call is one HTTP request against the configured base URL. The transport
//! decodes the JSON envelope but never interprets its status field.

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

use crate::error::WxError;
use crate::types::Envelope;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(crate) const BASE_URL_ENV: &str = "VIRTUAL_MACHINE_URL";

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// HTTP transport bound to one automation service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    upload_dir: PathBuf,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("upload_dir", &self.upload_dir)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a new transport builder
    pub fn builder() -> super::TransportBuilder {
        super::TransportBuilder::default()
    }

    pub(crate) fn new(http: Client, base_url: String, upload_dir: PathBuf) -> Self {
        Self {
            http,
            base_url,
            upload_dir,
            middleware_executor: None,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Directory where temporary upload files are written
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<Envelope<T>, WxError> {
        debug!("[wxhelper] {} {}", request.method(), request.url());

        let response = self.send_request(request).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// GET `path` and decode the envelope
    ///
    /// # Errors
    /// - `WxError::Http` when the request or body read fails
    /// - `WxError::Decode` when the body is not a valid envelope
    pub async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, WxError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.get(url).build()?;
        self.execute(request).await
    }

    /// POST `body` as JSON to `path` and decode the envelope
    ///
    /// # Errors
    /// - `WxError::Http` when the request or body read fails
    /// - `WxError::Decode` when the body is not a valid envelope
    pub async fn post_envelope<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, WxError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.post(url).json(body).build()?;
        self.execute(request).await
    }
}

impl Service<reqwest::Request> for Transport {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}
