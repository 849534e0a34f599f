use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::{admin, blocks, messages, users};

/// Every `/api` route plus the health check, bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth", get(auth::whoami))
        .route(
            "/api/users",
            get(users::list_users).post(users::register).patch(users::rename),
        )
        .route(
            "/api/messages",
            get(messages::get_messages).post(messages::send_message),
        )
        .route(
            "/api/blocks",
            get(blocks::get_blocks)
                .post(blocks::block_user)
                .delete(blocks::unblock_user),
        )
        .route("/api/admin", post(admin::run_command))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
