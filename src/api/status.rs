//! Per-operation success rules
//!
//! The two wxhelper server variants disagree on what a successful `code`
//! looks like, and the hook server even disagrees with itself between
//! operations. Rather than guessing a global rule, every operation looks its
//! rule up in an explicit table.
//!
//! | Operation | [`StatusPolicy::Simple`] | [`StatusPolicy::Hook`] |
//! |-----------|--------------------------|------------------------|
//! | check_login | `== 0` | `== 1` (predicate, never an error) |
//! | get_user_info | `== 0` | `== 1` |
//! | get_contact_list | `== 0` | unchecked |
//! | send_text | `== 0` | `!= 0` |
//! | send_image | `== 0` | unchecked |
//! | send_file | `== 0` | `!= 0` |
//! | sync_message | unchecked | unchecked |
//! | hook_sync_msg | `== 0` | `== 0` |
//! | unhook_sync_msg | `== 0` | `== 0` |

use crate::error::WxError;
use crate::types::Envelope;

/// Operations exposed by the automation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckLogin,
    GetUserInfo,
    GetContactList,
    SendText,
    SendImage,
    SendFile,
    SyncMessage,
    HookSyncMsg,
    UnhookSyncMsg,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::CheckLogin => "check_login",
            Operation::GetUserInfo => "get_user_info",
            Operation::GetContactList => "get_contact_list",
            Operation::SendText => "send_text",
            Operation::SendImage => "send_image",
            Operation::SendFile => "send_file",
            Operation::SyncMessage => "sync_message",
            Operation::HookSyncMsg => "hook_sync_msg",
            Operation::UnhookSyncMsg => "unhook_sync_msg",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a status code is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRule {
    Equals(i64),
    NotEquals(i64),
    Unchecked,
}

impl SuccessRule {
    pub fn accepts(self, code: i64) -> bool {
        match self {
            SuccessRule::Equals(expected) => code == expected,
            SuccessRule::NotEquals(rejected) => code != rejected,
            SuccessRule::Unchecked => true,
        }
    }
}

/// Which server variant's rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// The API server fronting the hook (`ApiClient`)
    Simple,
    /// The hook DLL's own HTTP server (`WxClient`)
    Hook,
}

impl StatusPolicy {
    pub fn rule(self, op: Operation) -> SuccessRule {
        use Operation::*;

        match (self, op) {
            (StatusPolicy::Simple, SyncMessage) => SuccessRule::Unchecked,
            (StatusPolicy::Simple, _) => SuccessRule::Equals(0),

            (StatusPolicy::Hook, CheckLogin | GetUserInfo) => SuccessRule::Equals(1),
            (StatusPolicy::Hook, SendText | SendFile) => SuccessRule::NotEquals(0),
            (StatusPolicy::Hook, HookSyncMsg | UnhookSyncMsg) => SuccessRule::Equals(0),
            // The image endpoint's code is never inspected, unlike send_file.
            (StatusPolicy::Hook, SendImage | GetContactList | SyncMessage) => {
                SuccessRule::Unchecked
            }
        }
    }
}

impl<T> Envelope<T> {
    /// Whether `code` satisfies the rule for `op` under `policy`.
    pub fn is_success(&self, policy: StatusPolicy, op: Operation) -> bool {
        policy.rule(op).accepts(self.code)
    }

    /// Apply the status rule, surfacing the server message on failure.
    pub fn check(self, policy: StatusPolicy, op: Operation) -> Result<Self, WxError> {
        if self.is_success(policy, op) {
            return Ok(self);
        }

        let message = if self.msg.is_empty() {
            format!("{} failed", op.name())
        } else {
            self.msg
        };
        Err(WxError::Api {
            operation: op.name(),
            code: self.code,
            message,
        })
    }

    /// Take the payload; an absent `data` is a malformed response.
    pub fn into_data(self) -> Result<T, WxError> {
        self.data.ok_or_else(WxError::missing_data)
    }
}
