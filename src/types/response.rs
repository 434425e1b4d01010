//! Shared HTTP response types.

use serde::Serialize;

/// Message-only response, used by delete endpoints and the 404 fallback.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
