use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use tracing::{info, warn};

use murmur_db::{Database, DbError};
use murmur_types::api::AdminRequest;
use murmur_types::limits::{ADMIN_NICKNAME, BANNED_MARKER};

use crate::auth::{AppState, fresh_token};
use crate::error::ApiError;
use crate::middleware::Credential;
use crate::response::{CREATED, DONE, Reply};

const INVALID_COMMAND: &str = "Invalid command.";

/// A parsed moderation command.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminCommand<'a> {
    /// Mark the user's nickname as banned and revoke their token.
    Ban { nickname: &'a str },
    /// Drop every message.
    Clear,
    /// Post a message in someone else's name.
    Send { nickname: &'a str, content: String },
}

impl<'a> AdminCommand<'a> {
    pub fn parse(line: &'a str) -> Result<Self, ApiError> {
        let invalid = || ApiError::Malformed(INVALID_COMMAND);
        let mut words = line.split_whitespace();

        match words.next() {
            Some("ban") => {
                let nickname = words.next().ok_or_else(invalid)?;
                Ok(Self::Ban { nickname })
            }
            Some("clear") => Ok(Self::Clear),
            Some("send") => {
                let nickname = words.next().ok_or_else(invalid)?;
                let content = words.collect::<Vec<_>>().join(" ");
                if content.is_empty() {
                    return Err(ApiError::malformed());
                }
                Ok(Self::Send { nickname, content })
            }
            _ => Err(invalid()),
        }
    }
}

/// Append the admin user unless somebody already holds `admin_token`.
/// An existing `Admin` row with a stale token is given the configured token
/// instead, so the name stays unique. Returns whether a user was created.
pub fn provision_admin(db: &Database, admin_token: &str) -> Result<bool, DbError> {
    db.with_tables_mut(|tables| {
        if tables.user_index_by_token(admin_token).is_some() {
            return false;
        }
        if let Some(index) = tables.user_index_by_nickname(ADMIN_NICKNAME) {
            warn!("Admin user at index {} held a different token, replacing it", index);
            tables.replace_token(index, admin_token.to_string());
            return false;
        }
        let index = tables.create_user(ADMIN_NICKNAME.to_string(), admin_token.to_string());
        info!("Provisioned admin user at index {}", index);
        true
    })
}

/// POST /api/admin
pub async fn run_command(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<AdminRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(admin_token) = state.admin_token.as_deref() else {
        return Err(ApiError::Unauthorized);
    };
    if !state.is_admin(&credential) {
        warn!("Rejected admin command from a non-admin credential");
        return Err(ApiError::Unauthorized);
    }

    let Json(req) = payload?;
    let line = req.command.unwrap_or_default();
    let command = AdminCommand::parse(&line)?;

    let reply = state.db.with_tables_mut(|tables| -> Result<Reply, ApiError> {
        match command {
            AdminCommand::Ban { nickname } => {
                let target = tables.user_index_by_nickname(nickname).ok_or(ApiError::NotFound)?;
                if tables.user_index_by_token(admin_token) == Some(target) {
                    return Err(ApiError::Forbidden("Cannot ban yourself."));
                }
                let token = fresh_token(tables);
                tables.rename_user(target, format!("{} {}", nickname, BANNED_MARKER));
                tables.replace_token(target, token);
                info!("Admin banned user {} ({})", target, nickname);
                Ok(DONE)
            }
            AdminCommand::Clear => {
                let dropped = tables.clear_messages();
                info!("Admin cleared {} messages", dropped);
                Ok(DONE)
            }
            AdminCommand::Send { nickname, content } => {
                let author = tables.user_index_by_nickname(nickname).ok_or(ApiError::NotFound)?;
                tables.insert_message(author, content);
                info!("Admin posted as user {} ({})", author, nickname);
                Ok(CREATED)
            }
        }
    })??;

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(AdminCommand::parse("ban alice").unwrap(), AdminCommand::Ban { nickname: "alice" });
        assert_eq!(AdminCommand::parse("  clear ").unwrap(), AdminCommand::Clear);
        assert_eq!(
            AdminCommand::parse("send bob  hello \t there").unwrap(),
            AdminCommand::Send {
                nickname: "bob",
                content: "hello there".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        for line in ["", "   ", "kick alice", "ban", "send", "send bob", "BAN alice"] {
            assert!(
                matches!(AdminCommand::parse(line), Err(ApiError::Malformed(_))),
                "{line:?} should be malformed"
            );
        }
    }

    #[test]
    fn provisioning_is_once_per_token() {
        let db = Database::in_memory();
        assert!(provision_admin(&db, "adm!n").unwrap());
        assert!(!provision_admin(&db, "adm!n").unwrap());

        let tables = db.snapshot().unwrap();
        assert_eq!(tables.users.len(), 1);
        assert_eq!(tables.nickname(0), Some(ADMIN_NICKNAME));
    }

    #[test]
    fn changed_token_reuses_existing_admin_row() {
        let db = Database::in_memory();
        db.with_tables_mut(|tables| {
            tables.create_user("bob".into(), "b0b".into());
            tables.create_user(ADMIN_NICKNAME.into(), "old!".into());
        })
        .unwrap();

        assert!(!provision_admin(&db, "new!").unwrap());

        let tables = db.snapshot().unwrap();
        assert_eq!(tables.users.len(), 2);
        assert_eq!(tables.user_index_by_token("new!"), Some(1));
        assert_eq!(tables.user_index_by_token("old!"), None);
    }
}
