use murmur_types::api::MessageEntry;

use crate::models::{BlockRow, MessageRow, Tables, UserRow};

/// Shown in place of an author whose index has no directory entry.
const UNKNOWN_AUTHOR: &str = "unknown";

impl Tables {
    // -- Users --

    /// Index of the user holding exactly this token.
    pub fn user_index_by_token(&self, token: &str) -> Option<usize> {
        if token.is_empty() {
            return None;
        }
        self.users.iter().position(|u| u.token == token)
    }

    pub fn user_index_by_nickname(&self, nickname: &str) -> Option<usize> {
        self.users.iter().position(|u| u.nickname == nickname)
    }

    pub fn nickname(&self, index: usize) -> Option<&str> {
        self.users.get(index).map(|u| u.nickname.as_str())
    }

    pub fn nicknames(&self) -> Vec<String> {
        self.users.iter().map(|u| u.nickname.clone()).collect()
    }

    /// Appends a user and returns its index.
    pub fn create_user(&mut self, nickname: String, token: String) -> usize {
        self.users.push(UserRow { nickname, token });
        self.users.len() - 1
    }

    pub fn rename_user(&mut self, index: usize, nickname: String) -> bool {
        match self.users.get_mut(index) {
            Some(user) => {
                user.nickname = nickname;
                true
            }
            None => false,
        }
    }

    pub fn replace_token(&mut self, index: usize, token: String) -> bool {
        match self.users.get_mut(index) {
            Some(user) => {
                user.token = token;
                true
            }
            None => false,
        }
    }

    // -- Messages --

    pub fn insert_message(&mut self, author_index: usize, content: String) {
        self.messages.push(MessageRow {
            author_index,
            content,
        });
    }

    /// Feed entries oldest first, authors resolved against the current directory.
    pub fn message_entries(&self) -> Vec<MessageEntry> {
        self.messages
            .iter()
            .map(|m| {
                let author = self.nickname(m.author_index).unwrap_or(UNKNOWN_AUTHOR);
                MessageEntry(author.to_string(), m.content.clone())
            })
            .collect()
    }

    /// Removes every message. Returns how many were dropped.
    pub fn clear_messages(&mut self) -> usize {
        let count = self.messages.len();
        self.messages.clear();
        count
    }

    // -- Blocks --

    pub fn blocked_by(&self, blocker_index: usize) -> Vec<usize> {
        self.blocks
            .iter()
            .filter(|b| b.blocker_index == blocker_index)
            .map(|b| b.blocked_index)
            .collect()
    }

    /// Insert a block unless the same pair exists.
    /// Returns true if the pair was inserted, false if it was already present.
    pub fn insert_block(&mut self, blocker_index: usize, blocked_index: usize) -> bool {
        let row = BlockRow {
            blocker_index,
            blocked_index,
        };
        if self.blocks.contains(&row) {
            return false;
        }
        self.blocks.push(row);
        true
    }

    /// Returns false if the pair did not exist.
    pub fn remove_block(&mut self, blocker_index: usize, blocked_index: usize) -> bool {
        let row = BlockRow {
            blocker_index,
            blocked_index,
        };
        match self.blocks.iter().position(|b| *b == row) {
            Some(pos) => {
                self.blocks.remove(pos);
                true
            }
            None => false,
        }
    }
}
