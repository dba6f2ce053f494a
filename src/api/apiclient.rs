//! Client for the wxhelper API server
//!
//! Every response carries `{code, msg, data}` and `code == 0` means success,
//! except for [`ApiClient::sync_message`] whose code is never inspected.
//! Images are sent inline as base64.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wxhelper_sdk::api::ApiClient;
//! use wxhelper_sdk::client::Transport;
//!
//! let transport = Transport::builder().base_url("http://127.0.0.1:8080").build()?;
//! let client = ApiClient::new(Arc::new(transport));
//!
//! client.send_text("filehelper", "hello").await?;
//! for msg in client.sync_message().await? {
//!     println!("{}: {}", msg.from_user, msg.content);
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::AsyncRead;

use crate::client::{Transport, TransportBuilder};
use crate::error::WxError;
use crate::types::{Account, Members, Message};

use super::status::{Operation, StatusPolicy};
use super::upload::inline_base64;
use super::ChatClient;

const POLICY: StatusPolicy = StatusPolicy::Simple;

#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    to: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct SendImageRequest<'a> {
    to: &'a str,
    image: String,
}

/// wxhelper API server client
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Build a client against the URL in `VIRTUAL_MACHINE_URL`.
    pub fn from_env() -> Result<Self, WxError> {
        let transport = TransportBuilder::from_env()?.build()?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// GET /api/checklogin
    pub async fn check_login(&self) -> Result<bool, WxError> {
        let op = Operation::CheckLogin;
        let r = self
            .transport
            .get_envelope::<bool>("/api/checklogin")
            .await?
            .check(POLICY, op)?;
        Ok(r.data.unwrap_or_default())
    }

    /// GET /api/userinfo
    pub async fn get_user_info(&self) -> Result<Account, WxError> {
        let op = Operation::GetUserInfo;
        self.transport
            .get_envelope::<Account>("/api/userinfo")
            .await?
            .check(POLICY, op)?
            .into_data()
    }

    /// GET /api/contacts
    pub async fn get_contact_list(&self) -> Result<Members, WxError> {
        let op = Operation::GetContactList;
        let r = self
            .transport
            .get_envelope::<Members>("/api/contacts")
            .await?
            .check(POLICY, op)?;
        Ok(r.data.unwrap_or_default())
    }

    /// POST /api/sendtext
    pub async fn send_text(&self, to: &str, content: &str) -> Result<(), WxError> {
        let body = SendTextRequest { to, content };
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/sendtext", &body)
            .await?
            .check(POLICY, Operation::SendText)?;
        Ok(())
    }

    /// POST /api/sendimage
    ///
    /// The whole image is read into memory and base64-encoded before the
    /// request is made; a read failure never reaches the network.
    pub async fn send_image<R>(&self, to: &str, image: &mut R) -> Result<(), WxError>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        let body = SendImageRequest {
            to,
            image: inline_base64(image).await?,
        };
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/sendimage", &body)
            .await?
            .check(POLICY, Operation::SendImage)?;
        Ok(())
    }

    /// GET /api/syncmessage
    ///
    /// Returns the messages as sent; the status code is not checked.
    pub async fn sync_message(&self) -> Result<Vec<Message>, WxError> {
        let r = self
            .transport
            .get_envelope::<Vec<Message>>("/api/syncmessage")
            .await?;
        Ok(r.data.unwrap_or_default())
    }
}

impl ChatClient for ApiClient {
    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn policy(&self) -> StatusPolicy {
        POLICY
    }

    fn check_login(&self) -> impl Future<Output = Result<bool, WxError>> + Send {
        ApiClient::check_login(self)
    }

    fn get_user_info(&self) -> impl Future<Output = Result<Account, WxError>> + Send {
        ApiClient::get_user_info(self)
    }

    fn get_contact_list(&self) -> impl Future<Output = Result<Members, WxError>> + Send {
        ApiClient::get_contact_list(self)
    }

    fn send_text(
        &self,
        to: &str,
        content: &str,
    ) -> impl Future<Output = Result<(), WxError>> + Send {
        ApiClient::send_text(self, to, content)
    }

    fn send_image<R>(
        &self,
        to: &str,
        image: &mut R,
    ) -> impl Future<Output = Result<(), WxError>> + Send
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        ApiClient::send_image(self, to, image)
    }
}
