pub mod api;
pub mod limits;
