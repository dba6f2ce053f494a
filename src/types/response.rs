use serde::Deserialize;

/// The `{code, msg, data}` wrapper every wxhelper response uses.
///
/// `data` is only meaningful when the operation's status policy accepts `code`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(alias = "status")]
    pub code: i64,
    #[serde(default, alias = "message")]
    pub msg: String,
    pub data: Option<T>,
}
