//! Entities decoded from wxhelper responses.
//!
//! All fields default when the server omits them; the service is loose about
//! which keys it sends between versions.

use serde::{Deserialize, Serialize};

/// Logged-in account information
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub wxid: String,
    pub account: String,
    pub name: String,
    pub head_image: String,
    pub mobile: String,
    pub signature: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub current_data_path: String,
    pub data_save_path: String,
    pub db_key: String,
}

/// A single contact record
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    pub wxid: String,
    pub custom_account: String,
    pub encrypt_name: String,
    pub nickname: String,
    pub pinyin: String,
    pub pinyin_all: String,
    #[serde(rename = "type")]
    pub member_type: i64,
    pub verify_flag: i64,
    pub reserved1: i64,
    pub reserved2: i64,
}

impl Member {
    /// Chat rooms use the `@chatroom` suffix on their wxid.
    pub fn is_chatroom(&self) -> bool {
        self.wxid.ends_with("@chatroom")
    }
}

/// Contact list in server order. Duplicates are kept.
pub type Members = Vec<Member>;

/// Inbound chat message
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub msg_id: i64,
    pub from_user: String,
    pub to_user: String,
    pub content: String,
    pub display_full_content: String,
    pub create_time: i64,
    #[serde(rename = "type")]
    pub msg_type: i64,
    pub msg_sequence: i64,
    pub pid: i64,
    pub signature: String,
}
