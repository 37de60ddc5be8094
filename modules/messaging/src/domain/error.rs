use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
