//! wxhelper SDK for Rust
//!
//! Client library for the wxhelper local automation HTTP service, which
//! drives a desktop WeChat instance: account info, contacts, sending text,
//! images and files, pulling new messages, and registering an HTTP callback
//! for intercepted messages.
//!
//! Two server variants exist and each has its own client:
//!
//! | Client | Server | Uploads | Success code |
//! |--------|--------|---------|--------------|
//! | [`ApiClient`] | API server | inline base64 | `0` |
//! | [`WxClient`] | hook server | temp file + `C:\` path | per operation |
//!
//! Both implement [`ChatClient`] for the operations they share.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wxhelper_sdk::{client::Transport, WxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Transport::builder()
//!         .base_url("http://127.0.0.1:19088")
//!         .build()?;
//!     let client = WxClient::new(Arc::new(transport));
//!
//!     let me = client.get_user_info().await?;
//!     println!("logged in as {}", me.name);
//!
//!     client.send_text("filehelper", "hello").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wxhelper_sdk::WxError;
//!
//! match result {
//!     Ok(()) => {}
//!     Err(WxError::Api { operation, code, message }) => {
//!         eprintln!("{operation} rejected ({code}): {message}");
//!     }
//!     Err(WxError::Decode(e)) => eprintln!("bad response: {e}"),
//!     Err(WxError::Http(e)) => eprintln!("HTTP error: {e}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```
//!
//! No call is retried. Cancel a call by dropping its future or bounding it
//! with `tokio::time::timeout`.

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod types;

pub use api::{ApiClient, ChatClient, WxClient};
pub use client::{Transport, TransportBuilder};
pub use error::WxError;
