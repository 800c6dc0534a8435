//! Local stand-in for the remote user collection.
//!
//! Mirrors the public placeholder service: reads return a fixed seed and writes are
//! acknowledged without being retained.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use shared::{
    domain::UserId,
    error::{ApiError, ErrorCode},
    protocol::{CreateUserRequest, RemoteUser, UpdateUserRequest},
};
use tracing::{info, warn};

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let app = build_router(AppState::new(settings.fail_writes));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, fail_writes = settings.fail_writes, "stub user service listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<RemoteUser>> {
    Json(state.seed.as_ref().clone())
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<RemoteUser>)> {
    reject_if_failing(&state, "create")?;
    let id = UserId(state.seed.len() as i64 + 1);
    info!(user_id = id.0, "acknowledged create without retaining it");
    Ok((
        StatusCode::CREATED,
        Json(RemoteUser {
            id,
            name: req.name,
            email: req.email,
            department: req.department,
        }),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<RemoteUser>> {
    reject_if_failing(&state, "update")?;
    info!(user_id = id, "acknowledged update without retaining it");
    Ok(Json(RemoteUser {
        id: UserId(id),
        ..req
    }))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    reject_if_failing(&state, "delete")?;
    info!(user_id = id, "acknowledged delete without retaining it");
    Ok(Json(serde_json::json!({})))
}

fn reject_if_failing(state: &AppState, operation: &str) -> ApiResult<()> {
    if !state.fail_writes {
        return Ok(());
    }
    warn!(operation, "rejecting write: fail_writes is enabled");
    Err((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiError::new(
            ErrorCode::Unavailable,
            format!("{operation} is unavailable"),
        )),
    ))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
