use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::error::WxError;

use super::transport::{
    MiddlewareExecutor, Transport, BASE_URL_ENV, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_TIMEOUT_SECS,
};

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<ReqwestResponse, reqwest::Error>> + Send>>;

/// Builder for [`Transport`]
///
/// # Example
///
/// ```rust
/// use wxhelper_sdk::client::Transport;
///
/// let transport = Transport::builder()
///     .base_url("http://127.0.0.1:19088")
///     .build()
///     .unwrap();
/// assert_eq!(transport.base_url(), "http://127.0.0.1:19088");
/// ```
#[must_use]
#[derive(Default)]
pub struct TransportBuilder<M = ()> {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    upload_dir: Option<PathBuf>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for TransportBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("upload_dir", &self.upload_dir)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl TransportBuilder {
    /// Seed the base URL from the `VIRTUAL_MACHINE_URL` environment variable.
    ///
    /// # Errors
    /// Returns `WxError::Config` if the variable is unset or not unicode.
    pub fn from_env() -> Result<Self, WxError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|e| WxError::Config(format!("{BASE_URL_ENV}: {e}")))?;
        Ok(Self::default().base_url(base_url))
    }
}

impl<M> TransportBuilder<M> {
    /// Set the base URL of the automation service
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Directory for temporary upload files
    ///
    /// Must be visible to the server process under the same path.
    /// Default: [`std::env::temp_dir`]
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> TransportBuilder<M2>
    where
        M2: Layer<Transport> + Clone + Send + Sync + 'static,
    {
        TransportBuilder {
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            upload_dir: self.upload_dir,
            middleware: Some(middleware),
        }
    }

    /// Build the transport
    ///
    /// # Errors
    /// Returns `WxError::Config` if the base URL is missing or not http(s)
    pub fn build(self) -> Result<Transport, WxError>
    where
        M: Layer<Transport> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let base_url = self
            .base_url
            .ok_or_else(|| WxError::Config("base_url is required".to_string()))?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WxError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        let upload_dir = self.upload_dir.unwrap_or_else(std::env::temp_dir);

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let mut transport = Transport::new(http, base_url, upload_dir);

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(transport.clone());
            let executor = make_middleware_executor(service);
            transport = transport.with_middleware_executor(executor);
        }

        Ok(transport)
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| -> MiddlewareFuture {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
