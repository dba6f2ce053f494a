//! Operations shared by both wxhelper clients

use std::future::Future;

use tokio::io::AsyncRead;

use crate::client::Transport;
use crate::error::WxError;
use crate::types::{Account, Members};

use super::status::StatusPolicy;

/// Common surface of [`ApiClient`](super::ApiClient) and
/// [`WxClient`](super::WxClient), so callers can swap one for the other.
///
/// Each call issues exactly one HTTP request and never retries.
pub trait ChatClient: Send + Sync {
    /// The transport this client sends through
    fn transport(&self) -> &Transport;

    /// The status rules this client applies
    fn policy(&self) -> StatusPolicy;

    fn check_login(&self) -> impl Future<Output = Result<bool, WxError>> + Send;

    fn get_user_info(&self) -> impl Future<Output = Result<Account, WxError>> + Send;

    fn get_contact_list(&self) -> impl Future<Output = Result<Members, WxError>> + Send;

    fn send_text(
        &self,
        to: &str,
        content: &str,
    ) -> impl Future<Output = Result<(), WxError>> + Send;

    /// Send an image read to the end from `image`.
    fn send_image<R>(
        &self,
        to: &str,
        image: &mut R,
    ) -> impl Future<Output = Result<(), WxError>> + Send
    where
        R: AsyncRead + Unpin + Send + ?Sized;
}
