use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use tracing::debug;

use murmur_db::Tables;
use murmur_types::api::BlockRequest;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::Credential;
use crate::response::{CREATED, DONE, Reply};

/// The identifier must name an existing user.
fn target(tables: &Tables, req: &BlockRequest) -> Result<usize, ApiError> {
    req.target_index()
        .filter(|&index| index < tables.users.len())
        .ok_or_else(ApiError::malformed)
}

/// GET /api/blocks — indices the caller has blocked.
pub async fn get_blocks(
    State(state): State<AppState>,
    credential: Credential,
) -> Result<impl IntoResponse, ApiError> {
    let blocked = state.db.with_tables(|tables| {
        let caller = credential.require(tables)?;
        Ok::<_, ApiError>(tables.blocked_by(caller))
    })??;

    Ok(Json(blocked))
}

/// POST /api/blocks — idempotent: an existing block answers 200, a new one 201.
pub async fn block_user(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<BlockRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let reply = state.db.with_tables_mut(|tables| -> Result<Reply, ApiError> {
        let caller = credential.require(tables)?;
        let Json(req) = payload?;
        let blocked = target(tables, &req)?;

        if caller == blocked {
            return Err(ApiError::Forbidden("Cannot block yourself."));
        }
        if !tables.insert_block(caller, blocked) {
            return Ok(DONE);
        }
        debug!("User {} blocked {}", caller, blocked);
        Ok(CREATED)
    })??;

    Ok(reply)
}

/// DELETE /api/blocks
pub async fn unblock_user(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<BlockRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.with_tables_mut(|tables| -> Result<(), ApiError> {
        let caller = credential.require(tables)?;
        let Json(req) = payload?;
        let blocked = target(tables, &req)?;

        if !tables.remove_block(caller, blocked) {
            return Err(ApiError::malformed());
        }
        debug!("User {} unblocked {}", caller, blocked);
        Ok(())
    })??;

    Ok(DONE)
}
