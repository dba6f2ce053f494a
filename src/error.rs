use thiserror::Error;

/// wxhelper SDK error types
#[derive(Debug, Error)]
pub enum WxError {
    /// Network or connection failure, including request timeouts.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not JSON or does not match the envelope shape.
    #[error("bad response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope decoded but the server rejected the operation.
    #[error("{operation} failed (code={code}): {message}")]
    Api {
        operation: &'static str,
        code: i64,
        message: String,
    },

    /// Local I/O failure while preparing an upload.
    #[error("local I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WxError {
    pub fn is_decode(&self) -> bool {
        matches!(self, WxError::Decode(_))
    }

    pub fn is_api(&self) -> bool {
        matches!(self, WxError::Api { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, WxError::Io(_))
    }

    pub(crate) fn missing_data() -> Self {
        WxError::Decode(<serde_json::Error as serde::de::Error>::missing_field(
            "data",
        ))
    }
}
