use serde::{Deserialize, Serialize};

// -- Users --

/// Body of `POST /api/users` and `PATCH /api/users`.
///
/// Fields are optional so that a missing value surfaces as a malformed
/// request from the handler rather than as a framework rejection.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NicknameRequest {
    pub nickname: Option<String>,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub content: Option<String>,
}

/// One feed entry as rendered by `GET /api/messages`: `[nickname, content]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry(pub String, pub String);

// -- Blocks --

/// Body of `POST /api/blocks` and `DELETE /api/blocks`.
///
/// The identifier may arrive as a JSON number or as a numeric string;
/// see [`BlockRequest::target_index`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockRequest {
    pub identifier: Option<serde_json::Value>,
}

impl BlockRequest {
    /// The referenced user index, if the identifier is a non-negative integer.
    pub fn target_index(&self) -> Option<usize> {
        match self.identifier.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|v| usize::try_from(v).ok()),
            serde_json::Value::String(s) => s.trim().parse::<usize>().ok(),
            _ => None,
        }
    }
}

// -- Admin --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminRequest {
    pub command: Option<String>,
}
