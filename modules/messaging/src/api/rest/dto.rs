use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::contract::model::{Message, User};

/// REST DTO for registration requests.
///
/// Required fields deserialize as Option; handlers do the presence checks
/// and answer with the API's 400 envelope instead of an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterReq {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// REST DTO for login requests
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// REST DTO for sending a message; receiverId is optional
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageReq {
    pub sender_id: Option<String>,
    pub receiver_id: Option<String>,
    pub content: Option<String>,
}

/// Query parameters for fetching a user's messages
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub user_id: Option<String>,
}

/// Public user projection: credentials and timestamps stay internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Wire representation of a stored message. The receiver key is omitted
/// entirely when the message has none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: u64,
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    pub content: String,
    pub timestamp: String,
}

/// REST DTO for a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredDto {
    pub message: String,
    pub user: UserDto,
}

/// REST DTO for a successful login; the token is a fake credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginDto {
    pub message: String,
    pub user: UserDto,
    pub token: String,
}

/// REST DTO for the user list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
}

/// REST DTO wrapping a freshly stored message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSentDto {
    pub message: MessageDto,
}

/// REST DTO for the message list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListDto {
    pub messages: Vec<MessageDto>,
}

// Conversion implementations between contract models and REST DTOs

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            // Millisecond ISO-8601 with a Z suffix
            timestamp: message
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
