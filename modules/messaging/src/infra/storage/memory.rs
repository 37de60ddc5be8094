use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::contract::model::{Message, NewMessage, StoreStats, User};
use crate::domain::repo::ChatRepository;

/// Process-lifetime store: users keyed by email, messages append-only.
///
/// A single lock serializes writers on the multi-threaded runtime; no
/// eviction, no secondary indexes.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    users: HashMap<String, User>,
    messages: Vec<Message>,
    next_message_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: HashMap::new(),
                messages: Vec::new(),
                next_message_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryStore {
    async fn insert_user(&self, user: User) -> anyhow::Result<bool> {
        let mut inner = self.inner.write();
        match inner.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(true)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.inner.read().users.get(email).cloned())
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.inner.read().users.values().cloned().collect())
    }

    async fn append_message(&self, new: NewMessage, at: DateTime<Utc>) -> anyhow::Result<Message> {
        let mut inner = self.inner.write();
        let id = inner.next_message_id;
        inner.next_message_id += 1;

        let message = Message {
            id,
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            content: new.content,
            timestamp: at,
        };
        inner.messages.push(message.clone());
        Ok(message)
    }

    async fn messages_for_user(&self, user_id: &str) -> anyhow::Result<Vec<Message>> {
        let inner = self.inner.read();
        Ok(inner
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn stats(&self) -> anyhow::Result<StoreStats> {
        let inner = self.inner.read();
        Ok(StoreStats {
            users: inner.users.len(),
            messages: inner.messages.len(),
        })
    }
}
