//! The uniform response body.
//!
//! Every endpoint - success or failure - speaks the same `{message}` shape;
//! no structured error codes are exposed to clients.

use serde::{Deserialize, Serialize};

/// A bare confirmation or error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
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
