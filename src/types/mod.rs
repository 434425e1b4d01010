//! Shared types used across the API surface.

mod pagination;
mod response;

pub use pagination::PageRequest;
pub use response::MessageResponse;
