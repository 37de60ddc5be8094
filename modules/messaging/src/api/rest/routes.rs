use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Wire the messaging REST surface onto a fresh router.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/users", get(handlers::list_users))
        .route(
            "/api/v1/messages",
            post(handlers::send_message).get(handlers::get_messages),
        )
        .layer(Extension(service))
}
