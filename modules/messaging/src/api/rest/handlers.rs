use axum::{extract::Query, http::StatusCode, response::Json, Extension};
use tracing::{error, info};

use crate::api::rest::dto::{
    LoginDto, LoginReq, MessageListDto, MessageSentDto, MessagesQuery, RegisterReq, RegisteredDto,
    SendMessageReq, UserDto, UserListDto,
};
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::contract::model::{NewMessage, NewUser};
use crate::domain::service::Service;

/// Absent and empty values fail presence checks the same way.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Non-cryptographic stand-in returned on login; not a real credential.
fn fake_token(user_id: &str) -> String {
    format!("fake-jwt-token-{user_id}")
}

/// Register a new user
pub async fn register(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<RegisteredDto>), ApiError> {
    let (Some(username), Some(email), Some(password)) = (
        present(req.username),
        present(req.email),
        present(req.password),
    ) else {
        return Err(ApiError::missing_fields());
    };

    info!("Registering user with email: {}", email);

    match svc
        .register(NewUser {
            username,
            email,
            password,
        })
        .await
    {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(RegisteredDto {
                message: "User registered successfully".to_string(),
                user: UserDto::from(user),
            }),
        )),
        Err(e) => {
            error!("Failed to register user: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Log a user in with a plaintext credential check
pub async fn login(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginDto>, ApiError> {
    let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
        return Err(ApiError::missing_credentials());
    };

    info!("Login attempt for email: {}", email);

    match svc.login(&email, &password).await {
        Ok(user) => {
            let token = fake_token(&user.id);
            Ok(Json(LoginDto {
                message: "Login successful".to_string(),
                user: UserDto::from(user),
                token,
            }))
        }
        Err(e) => {
            error!("Failed to log in: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// List all users (public fields only)
pub async fn list_users(
    Extension(svc): Extension<std::sync::Arc<Service>>,
) -> Result<Json<UserListDto>, ApiError> {
    match svc.list_users().await {
        Ok(users) => Ok(Json(UserListDto {
            users: users.into_iter().map(UserDto::from).collect(),
        })),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Store a new message; senderId and content are required
pub async fn send_message(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<SendMessageReq>,
) -> Result<(StatusCode, Json<MessageSentDto>), ApiError> {
    let (Some(sender_id), Some(content)) = (present(req.sender_id), present(req.content)) else {
        return Err(ApiError::missing_fields());
    };
    let receiver_id = present(req.receiver_id);

    info!("Storing message from sender: {}", sender_id);

    match svc
        .send_message(NewMessage {
            sender_id,
            receiver_id,
            content,
        })
        .await
    {
        Ok(message) => Ok((
            StatusCode::CREATED,
            Json(MessageSentDto {
                message: message.into(),
            }),
        )),
        Err(e) => {
            error!("Failed to store message: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Fetch all messages where the user is sender or receiver
pub async fn get_messages(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessageListDto>, ApiError> {
    let Some(user_id) = present(query.user_id) else {
        return Err(ApiError::missing_user_id());
    };

    match svc.messages_for_user(&user_id).await {
        Ok(messages) => Ok(Json(MessageListDto {
            messages: messages.into_iter().map(Into::into).collect(),
        })),
        Err(e) => {
            error!("Failed to fetch messages for {}: {}", user_id, e);
            Err(map_domain_error(&e))
        }
    }
}
