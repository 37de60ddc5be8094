use std::sync::Arc;

use axum::{http::StatusCode, response::Json, Extension};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::error;

use crate::AppInfo;
use messaging::domain::service::Service;

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Health check with live store counters
pub async fn health(
    Extension(svc): Extension<Arc<Service>>,
    Extension(info): Extension<Arc<AppInfo>>,
) -> Result<Json<Value>, StatusCode> {
    let stats = svc.stats().await.map_err(|e| {
        error!("Failed to read store stats: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(json!({
        "status": "OK",
        "timestamp": iso_now(),
        "uptime": info.uptime_secs(),
        "environment": info.environment,
        "users": stats.users,
        "messages": stats.messages
    })))
}

/// API version banner
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "Telechat Backend API",
        "version": "1.0.0",
        "status": "running",
        "features": ["authentication", "messaging", "users", "health"]
    }))
}

/// Root endpoint: route directory plus store stats
pub async fn root(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Value>, StatusCode> {
    let stats = svc.stats().await.map_err(|e| {
        error!("Failed to read store stats: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(json!({
        "message": "Telechat Backend",
        "status": "running",
        "endpoints": {
            "health": "/health",
            "api": "/api/v1",
            "register": "POST /api/v1/auth/register",
            "login": "POST /api/v1/auth/login",
            "users": "GET /api/v1/users",
            "sendMessage": "POST /api/v1/messages",
            "getMessages": "GET /api/v1/messages"
        },
        "stats": {
            "users": stats.users,
            "messages": stats.messages
        }
    })))
}
