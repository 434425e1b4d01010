//! HTTP request handlers.

pub mod place_handler;
pub mod user_handler;

pub use place_handler::{place_read_routes, place_write_routes};
pub use user_handler::user_routes;
