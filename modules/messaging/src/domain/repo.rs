use crate::contract::model::{Message, NewMessage, StoreStats, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Port for the domain layer: storage operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Insert a fully-formed user keyed by email.
    ///
    /// Service computes id/timestamps/validation; the store persists.
    /// Returns false when the email is already taken; the check and the
    /// insert are a single atomic operation.
    async fn insert_user(&self, user: User) -> anyhow::Result<bool>;
    /// Load a user by email.
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// All users, order unspecified.
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    /// Assign the next message id, append, and return the stored message.
    async fn append_message(&self, new: NewMessage, at: DateTime<Utc>) -> anyhow::Result<Message>;
    /// Messages where the user is sender or receiver, in insertion order.
    async fn messages_for_user(&self, user_id: &str) -> anyhow::Result<Vec<Message>>;
    /// Current user and message counts.
    async fn stats(&self) -> anyhow::Result<StoreStats>;
}
