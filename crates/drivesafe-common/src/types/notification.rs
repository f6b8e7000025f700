//! User notifications emitted by the pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A human-readable message for a user. Delivery is fire-and-forget;
/// failures never roll back the operation that produced the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient
    pub user_id: Uuid,
    /// Message body
    pub message: String,
    /// Whether the user has seen the message
    pub read: bool,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, message: &str) -> Self {
        Self {
            user_id,
            message: message.to_string(),
            read: false,
            created_at: Utc::now(),
        }
    }
}
