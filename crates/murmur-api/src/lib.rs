pub mod admin;
pub mod auth;
pub mod blocks;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod sanitize;
pub mod users;
