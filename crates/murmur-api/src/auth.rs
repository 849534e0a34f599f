use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use murmur_crypto::tokens::generate_token;
use murmur_db::{Database, Tables};

use crate::error::ApiError;
use crate::middleware::Credential;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Normalized admin token. `None` disables the admin endpoint.
    pub admin_token: Option<String>,
}

impl AppStateInner {
    pub fn new(db: Database, admin_token: Option<String>) -> Self {
        Self { db, admin_token }
    }

    /// Whether the presented credential is exactly the configured admin token.
    pub fn is_admin(&self, credential: &Credential) -> bool {
        match (&self.admin_token, credential.token()) {
            (Some(admin), Some(token)) => admin == token,
            _ => false,
        }
    }
}

/// A random token no user currently holds.
pub fn fresh_token(tables: &Tables) -> String {
    loop {
        let token = generate_token();
        if tables.user_index_by_token(&token).is_none() {
            return token;
        }
    }
}

/// GET /api/auth — the caller's nickname, or 401.
pub async fn whoami(
    State(state): State<AppState>,
    credential: Credential,
) -> Result<impl IntoResponse, ApiError> {
    let nickname = state.db.with_tables(|tables| {
        let index = credential.require(tables)?;
        Ok::<_, ApiError>(tables.nickname(index).unwrap_or_default().to_string())
    })??;

    Ok(nickname)
}
