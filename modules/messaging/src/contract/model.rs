use chrono::{DateTime, Utc};

/// Pure user model shared across module boundaries (no serde).
///
/// `id` is the Unix-millisecond clock reading at registration, kept as a
/// string. `email` is the unique key; `password` is stored and compared in
/// plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Data for registering a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A stored chat message. Ids increase strictly from 1 for the process
/// lifetime; messages are immutable and never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub sender_id: String,
    pub receiver_id: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Data for sending a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: String,
    pub receiver_id: Option<String>,
    pub content: String,
}

/// Live store counters, reported by the status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub users: usize,
    pub messages: usize,
}
