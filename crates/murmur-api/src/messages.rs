use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use tracing::debug;

use murmur_db::Tables;
use murmur_types::api::SendMessageRequest;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::Credential;
use crate::response::CREATED;
use crate::sanitize::sanitize;

/// GET /api/messages — the whole feed as `[nickname, content]` pairs.
pub async fn get_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let entries = state.db.with_tables(Tables::message_entries)?;
    Ok(Json(entries))
}

/// POST /api/messages
///
/// Content from the admin token is stored verbatim, markup included.
/// Everyone else gets it sanitized.
pub async fn send_message(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let raw = state.is_admin(&credential);

    state.db.with_tables_mut(|tables| -> Result<(), ApiError> {
        let author = credential.require(tables)?;

        let content = req.content.as_deref().ok_or_else(ApiError::malformed)?;
        let content = if raw { content.to_string() } else { sanitize(content) };
        let content = content.trim();
        if content.is_empty() {
            return Err(ApiError::malformed());
        }

        tables.insert_message(author, content.to_string());
        debug!("User {} posted {} bytes", author, content.len());
        Ok(())
    })??;

    Ok(CREATED)
}
