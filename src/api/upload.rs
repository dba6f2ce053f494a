//! Binary upload adapter
//!
//! The two server variants take binary payloads differently:
//!
//! - the API server accepts the bytes inline as base64 text ([`inline_base64`])
//! - the hook server reads a file from disk, so the bytes are written to a
//!   temporary file and its path is sent instead ([`TempUpload`])
//!
//! ## Deployment constraint
//!
//! The hook server runs under Windows (or Wine) and must see the temporary
//! file under the same path the client wrote it to, with `C:\` prepended.
//! This holds when the client's filesystem root is mounted as the server's
//! `C:` drive. No other path mapping is supported.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::WxError;

/// Prefix turning a client path into the path the hook server opens.
pub const SERVER_DRIVE_PREFIX: &str = "C:\\";

const TEMP_FILE_PREFIX: &str = "wxhelper-";

/// Drain `reader` into memory and encode it as standard base64.
///
/// No size limit is enforced; the server may reject large payloads.
pub async fn inline_base64<R>(reader: &mut R) -> Result<String, WxError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    Ok(STANDARD.encode(&data))
}

/// A temporary file holding one upload, removed on drop.
///
/// Cleanup runs on every exit path, including cancellation of the future
/// that owns the guard. A failed removal is logged and otherwise ignored.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Copy `reader` into a uniquely named file under `dir`.
    ///
    /// # Errors
    /// Returns `WxError::Io` if the file cannot be created or written; any
    /// partially written file is removed.
    pub async fn create<R>(dir: &Path, reader: &mut R) -> Result<Self, WxError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = dir.join(format!(
            "{}{}",
            TEMP_FILE_PREFIX,
            uuid::Uuid::new_v4().simple()
        ));

        // The guard exists before the open so a cancelled open is still cleaned up.
        let upload = Self { path };
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&upload.path)
            .await?;

        let written = tokio::io::copy(reader, &mut file).await?;
        file.sync_all().await?;
        debug!(
            "[wxhelper] staged {} bytes at {}",
            written,
            upload.path.display()
        );

        Ok(upload)
    }

    /// Path of the file on the client side
    pub fn local_path(&self) -> &Path {
        &self.path
    }

    /// Path the hook server uses to open the same file
    pub fn server_path(&self) -> String {
        server_path(&self.path)
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        // Blocking unlink on purpose: Drop cannot await, and one unlink is cheap.
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(
                    "[wxhelper] failed to remove temp upload {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Literal drive-letter rewrite of a client path.
pub fn server_path(local: &Path) -> String {
    format!("{}{}", SERVER_DRIVE_PREFIX, local.display())
}
