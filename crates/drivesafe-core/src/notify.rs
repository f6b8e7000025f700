//! Notification collaborator seam
//!
//! Fire-and-forget: the service layer logs delivery failures and never
//! rolls back the operation that produced the message.

use async_trait::async_trait;
use dashmap::DashMap;
use drivesafe_common::{Notification, Result};
use uuid::Uuid;

/// Delivers human-readable messages to users.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: Uuid, message: &str) -> Result<()>;
}

/// In-process notifier that retains messages for per-user listing.
pub struct InMemoryNotifier {
    inbox: DashMap<Uuid, Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            inbox: DashMap::new(),
        }
    }

    /// Notifications for a user, newest first
    pub fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
        self.inbox
            .get(&user_id)
            .map(|messages| messages.iter().rev().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, user_id: Uuid, message: &str) -> Result<()> {
        self.inbox
            .entry(user_id)
            .or_default()
            .push(Notification::new(user_id, message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inbox_newest_first() {
        let notifier = InMemoryNotifier::new();
        let user_id = Uuid::new_v4();

        notifier.notify(user_id, "first").await.unwrap();
        notifier.notify(user_id, "second").await.unwrap();

        let inbox = notifier.for_user(user_id);
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].message, "second");
        assert!(!inbox[0].read);
    }

    #[tokio::test]
    async fn test_empty_inbox() {
        let notifier = InMemoryNotifier::new();
        assert!(notifier.for_user(Uuid::new_v4()).is_empty());
    }
}
