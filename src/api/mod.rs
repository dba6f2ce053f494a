//! wxhelper API clients
//!
//! - [`apiclient`] - [`ApiClient`], for the API server (inline base64 uploads)
//! - [`wxclient`] - [`WxClient`], for the hook's own server (temp-file uploads, message hook)
//! - [`status`] - Per-operation success rules for both servers
//! - [`upload`] - Binary upload adapter
//! - [`trait@ChatClient`] - Operations both clients share
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wxhelper_sdk::api::{ChatClient, WxClient};
//! use wxhelper_sdk::client::Transport;
//!
//! let transport = Transport::builder().base_url("http://127.0.0.1:19088").build()?;
//! let client = WxClient::new(Arc::new(transport));
//! if client.check_login().await? {
//!     client.send_text("filehelper", "online").await?;
//! }
//! ```

pub mod apiclient;
pub mod status;
pub mod r#trait;
pub mod upload;
pub mod wxclient;

pub use apiclient::ApiClient;
pub use r#trait::ChatClient;
pub use status::{Operation, StatusPolicy, SuccessRule};
pub use upload::{inline_base64, TempUpload};
pub use wxclient::WxClient;
