use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use murmur_db::Tables;
use murmur_types::api::NicknameRequest;
use murmur_types::limits::{ADMIN_NICKNAME, MAX_NICKNAME_LEN};

use crate::auth::{AppState, fresh_token};
use crate::error::ApiError;
use crate::middleware::Credential;
use crate::response::CHANGED;
use crate::sanitize::sanitize;

/// Sanitize a requested nickname, drop all whitespace and check its length
/// and that it is not the reserved admin name.
pub fn clean_nickname(raw: Option<&str>) -> Result<String, ApiError> {
    let nickname: String = sanitize(raw.unwrap_or_default())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let len = nickname.chars().count();
    if len == 0 || len > MAX_NICKNAME_LEN {
        return Err(ApiError::malformed());
    }
    if nickname.eq_ignore_ascii_case(ADMIN_NICKNAME) {
        return Err(ApiError::Forbidden("Nickname reserved."));
    }
    Ok(nickname)
}

/// Fails if someone other than `owner` already goes by `nickname`.
fn ensure_available(tables: &Tables, nickname: &str, owner: Option<usize>) -> Result<(), ApiError> {
    match tables.user_index_by_nickname(nickname) {
        Some(holder) if Some(holder) != owner => Err(ApiError::Forbidden("Nickname taken.")),
        _ => Ok(()),
    }
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let nicknames = state.db.with_tables(Tables::nicknames)?;
    Ok(Json(nicknames))
}

/// POST /api/users — anonymous registration. Responds with the new token.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NicknameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let nickname = clean_nickname(req.nickname.as_deref())?;

    let token = state.db.with_tables_mut(|tables| {
        ensure_available(tables, &nickname, None)?;
        let token = fresh_token(tables);
        let index = tables.create_user(nickname.clone(), token.clone());
        debug!("Registered user {} as {}", index, nickname);
        Ok::<_, ApiError>(token)
    })??;

    Ok((StatusCode::CREATED, token))
}

/// PATCH /api/users — change the caller's nickname.
pub async fn rename(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<NicknameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let nickname = clean_nickname(req.nickname.as_deref())?;

    state.db.with_tables_mut(|tables| {
        let caller = credential.resolve(tables);
        ensure_available(tables, &nickname, caller)?;
        let index = caller.ok_or(ApiError::Unauthorized)?;
        tables.rename_user(index, nickname.clone());
        debug!("User {} renamed to {}", index, nickname);
        Ok::<_, ApiError>(())
    })??;

    Ok(CHANGED)
}
