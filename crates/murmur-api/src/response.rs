use axum::http::StatusCode;

pub type Reply = (StatusCode, &'static str);

pub const DONE: Reply = (StatusCode::OK, "200: Done.");
pub const CREATED: Reply = (StatusCode::CREATED, "201: Created.");
pub const CHANGED: Reply = (StatusCode::CREATED, "201: Changed.");
