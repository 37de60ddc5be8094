use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::contract::model::{Message, NewMessage, NewUser, StoreStats, User};
use crate::domain::error::DomainError;
use crate::domain::repo::ChatRepository;

/// Domain service with the chat business rules.
/// Depends only on the repository port, not on storage types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ChatRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn ChatRepository>) -> Self {
        Self { repo }
    }

    /// Register a user keyed by email. The id and `created_at` derive from
    /// the same clock reading; the password is kept as received.
    #[instrument(name = "messaging.service.register", skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering user");

        let now = Utc::now();
        let user = User {
            id: now.timestamp_millis().to_string(),
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            created_at: now,
        };

        let inserted = self
            .repo
            .insert_user(user.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !inserted {
            return Err(DomainError::email_already_exists(user.email));
        }

        info!("Registered user with id={}", user.id);
        Ok(user)
    }

    /// Plaintext credential check. Absent email and wrong password are
    /// indistinguishable to the caller.
    #[instrument(name = "messaging.service.login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        debug!("Authenticating user");

        let user = self
            .repo
            .find_user_by_email(email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match user {
            Some(user) if user.password == password => {
                debug!("Authenticated user id={}", user.id);
                Ok(user)
            }
            _ => Err(DomainError::invalid_credentials()),
        }
    }

    #[instrument(name = "messaging.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self
            .repo
            .list_users()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    /// Store the message; the store assigns the next id.
    #[instrument(name = "messaging.service.send_message", skip(self, new_message), fields(sender_id = %new_message.sender_id))]
    pub async fn send_message(&self, new_message: NewMessage) -> Result<Message, DomainError> {
        let message = self
            .repo
            .append_message(new_message, Utc::now())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        debug!("Stored message id={}", message.id);
        Ok(message)
    }

    #[instrument(name = "messaging.service.messages_for_user", skip(self), fields(user_id = %user_id))]
    pub async fn messages_for_user(&self, user_id: &str) -> Result<Vec<Message>, DomainError> {
        let messages = self
            .repo
            .messages_for_user(user_id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        debug!("Found {} messages", messages.len());
        Ok(messages)
    }

    pub async fn stats(&self) -> Result<StoreStats, DomainError> {
        self.repo
            .stats()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::memory::InMemoryStore;

    fn service() -> Service {
        Service::new(Arc::new(InMemoryStore::new()))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn register_assigns_time_derived_id() {
        let svc = service();
        let user = svc.register(new_user("alice@example.com")).await.unwrap();

        assert_eq!(user.id, user.created_at.timestamp_millis().to_string());
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.password, "secret");
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let svc = service();
        svc.register(new_user("dup@example.com")).await.unwrap();

        let err = svc.register(new_user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn login_requires_exact_plaintext_match() {
        let svc = service();
        svc.register(new_user("login@example.com")).await.unwrap();

        let user = svc.login("login@example.com", "secret").await.unwrap();
        assert_eq!(user.email, "login@example.com");

        let err = svc.login("login@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));

        // Unknown email yields the same error as a bad password
        let err = svc.login("ghost@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn stats_follow_registrations_and_sends() {
        let svc = service();
        assert_eq!(svc.stats().await.unwrap(), StoreStats::default());

        svc.register(new_user("stats@example.com")).await.unwrap();
        svc.send_message(NewMessage {
            sender_id: "A".to_string(),
            receiver_id: Some("B".to_string()),
            content: "hi".to_string(),
        })
        .await
        .unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.messages, 1);
    }
}
