//! Client for the hook's own HTTP server
//!
//! Every endpoint is a POST with a JSON body. Success codes vary per
//! operation; see [`StatusPolicy::Hook`] for the table. Images and files are
//! handed over through a temporary file the server opens by path, see
//! [`TempUpload`].

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::AsyncRead;

use crate::client::{Transport, TransportBuilder};
use crate::error::WxError;
use crate::types::{Account, HookSyncMsgOption, Members};

use super::status::{Operation, StatusPolicy};
use super::upload::TempUpload;
use super::ChatClient;

const POLICY: StatusPolicy = StatusPolicy::Hook;

#[derive(Debug, Serialize)]
struct Empty {}

#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    wxid: &'a str,
    msg: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendImageRequest<'a> {
    wxid: &'a str,
    image_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendFileRequest<'a> {
    wxid: &'a str,
    file_path: String,
}

/// wxhelper hook server client
#[derive(Debug, Clone)]
pub struct WxClient {
    transport: Arc<Transport>,
}

impl WxClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Build a client against the URL in `VIRTUAL_MACHINE_URL`.
    pub fn from_env() -> Result<Self, WxError> {
        let transport = TransportBuilder::from_env()?.build()?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// POST /api/checkLogin
    ///
    /// `true` iff the server answers with code 1. Any other code is a
    /// negative answer, not an error.
    pub async fn check_login(&self) -> Result<bool, WxError> {
        let r = self
            .transport
            .post_envelope::<serde_json::Value, _>("/api/checkLogin", &Empty {})
            .await?;
        Ok(r.is_success(POLICY, Operation::CheckLogin))
    }

    /// POST /api/userInfo
    pub async fn get_user_info(&self) -> Result<Account, WxError> {
        self.transport
            .post_envelope::<Account, _>("/api/userInfo", &Empty {})
            .await?
            .check(POLICY, Operation::GetUserInfo)?
            .into_data()
    }

    /// POST /api/sendTextMsg
    pub async fn send_text(&self, to: &str, content: &str) -> Result<(), WxError> {
        let body = SendTextRequest {
            wxid: to,
            msg: content,
        };
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/sendTextMsg", &body)
            .await?
            .check(POLICY, Operation::SendText)?;
        Ok(())
    }

    /// POST /api/getContactList
    pub async fn get_contact_list(&self) -> Result<Members, WxError> {
        let r = self
            .transport
            .post_envelope::<Members, _>("/api/getContactList", &Empty {})
            .await?;
        Ok(r.data.unwrap_or_default())
    }

    /// POST /api/hookSyncMsg
    ///
    /// Ask the server to push intercepted messages to `opt.local_url`.
    pub async fn http_hook_sync_msg(&self, opt: &HookSyncMsgOption) -> Result<(), WxError> {
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/hookSyncMsg", &opt.to_wire())
            .await?
            .check(POLICY, Operation::HookSyncMsg)?;
        Ok(())
    }

    /// POST /api/unhookSyncMsg
    pub async fn unhook_sync_msg(&self) -> Result<(), WxError> {
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/unhookSyncMsg", &Empty {})
            .await?
            .check(POLICY, Operation::UnhookSyncMsg)?;
        Ok(())
    }

    /// POST /api/sendImagesMsg
    ///
    /// The response code is not inspected: any decodable envelope counts as
    /// sent. [`send_file`](Self::send_file) does check its code.
    pub async fn send_image<R>(&self, to: &str, image: &mut R) -> Result<(), WxError>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        let upload = TempUpload::create(self.transport.upload_dir(), image).await?;
        let body = SendImageRequest {
            wxid: to,
            image_path: upload.server_path(),
        };
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/sendImagesMsg", &body)
            .await?
            .check(POLICY, Operation::SendImage)?;
        Ok(())
    }

    /// POST /api/sendFileMsg
    pub async fn send_file<R>(&self, to: &str, file: &mut R) -> Result<(), WxError>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        let upload = TempUpload::create(self.transport.upload_dir(), file).await?;
        let body = SendFileRequest {
            wxid: to,
            file_path: upload.server_path(),
        };
        self.transport
            .post_envelope::<serde_json::Value, _>("/api/sendFileMsg", &body)
            .await?
            .check(POLICY, Operation::SendFile)?;
        Ok(())
    }
}

impl ChatClient for WxClient {
    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn policy(&self) -> StatusPolicy {
        POLICY
    }

    fn check_login(&self) -> impl Future<Output = Result<bool, WxError>> + Send {
        WxClient::check_login(self)
    }

    fn get_user_info(&self) -> impl Future<Output = Result<Account, WxError>> + Send {
        WxClient::get_user_info(self)
    }

    fn get_contact_list(&self) -> impl Future<Output = Result<Members, WxError>> + Send {
        WxClient::get_contact_list(self)
    }

    fn send_text(
        &self,
        to: &str,
        content: &str,
    ) -> impl Future<Output = Result<(), WxError>> + Send {
        WxClient::send_text(self, to, content)
    }

    fn send_image<R>(
        &self,
        to: &str,
        image: &mut R,
    ) -> impl Future<Output = Result<(), WxError>> + Send
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        WxClient::send_image(self, to, image)
    }
}
