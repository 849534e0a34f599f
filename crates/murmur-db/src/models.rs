//! Table rows. On disk each row is a two-element JSON array, so the named
//! fields convert through tuples for serde.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct UserRow {
    pub nickname: String,
    pub token: String,
}

impl From<(String, String)> for UserRow {
    fn from((nickname, token): (String, String)) -> Self {
        Self { nickname, token }
    }
}

impl From<UserRow> for (String, String) {
    fn from(row: UserRow) -> Self {
        (row.nickname, row.token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, String)", into = "(usize, String)")]
pub struct MessageRow {
    pub author_index: usize,
    pub content: String,
}

impl From<(usize, String)> for MessageRow {
    fn from((author_index, content): (usize, String)) -> Self {
        Self {
            author_index,
            content,
        }
    }
}

impl From<MessageRow> for (usize, String) {
    fn from(row: MessageRow) -> Self {
        (row.author_index, row.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct BlockRow {
    pub blocker_index: usize,
    pub blocked_index: usize,
}

impl From<(usize, usize)> for BlockRow {
    fn from((blocker_index, blocked_index): (usize, usize)) -> Self {
        Self {
            blocker_index,
            blocked_index,
        }
    }
}

impl From<BlockRow> for (usize, usize) {
    fn from(row: BlockRow) -> Self {
        (row.blocker_index, row.blocked_index)
    }
}

/// The whole persisted state. A user's position in `users` is its identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub users: Vec<UserRow>,
    #[serde(default)]
    pub messages: Vec<MessageRow>,
    #[serde(default)]
    pub blocks: Vec<BlockRow>,
}
