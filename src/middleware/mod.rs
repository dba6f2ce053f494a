//! Middleware components for the wxhelper transport.
//!
//! Middleware wraps the [`Transport`](crate::client::Transport) using Tower
//! layers and is installed with
//! [`TransportBuilder::with_middleware`](crate::client::TransportBuilder::with_middleware).
//!
//! ```ignore
//! use wxhelper_sdk::client::Transport;
//! use wxhelper_sdk::middleware::LoggingMiddleware;
//!
//! let transport = Transport::builder()
//!     .base_url("http://127.0.0.1:19088")
//!     .with_middleware(LoggingMiddleware::new())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
