//! Auth API endpoints: signup, login, session check, logout.

use crate::auth::middleware::{check_rate_limit, AppState, AuthSession, BearerToken};
use crate::auth::password::Credential;
use crate::auth::session::generate_session_token;
use crate::error::AppError;
use crate::models::{
    LoginRequest, SessionResponse, SignupRequest, StoredSession, StoredUser, UserView,
};
use crate::storage;
use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;

/// Create a session for `user` and build the response body.
async fn establish_session<C>(
    con: &mut C,
    state: &AppState,
    user: &StoredUser,
) -> Result<SessionResponse, AppError>
where
    C: redis::AsyncCommands,
{
    let token = generate_session_token();

    let session = StoredSession {
        token: token.clone(),
        user_id: user.id,
        created_at: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs(),
    };

    storage::session::store_session(con, &session, state.config.session_ttl_secs).await?;

    Ok(SessionResponse {
        token,
        user: UserView::from(user),
    })
}

/// POST /signup — Create account and establish session
pub async fn signup(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Rate limit by IP
    let mut con = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))?;

    let rate_limit_key = format!("ratelimit:auth:{}", addr.ip());
    let allowed = check_rate_limit(
        &mut con,
        &rate_limit_key,
        state.config.rate_limit_auth_per_min,
        60,
    )
    .await
    .map_err(|e| AppError::Internal(format!("Rate limit check failed: {}", e)))?;

    if !allowed {
        tracing::warn!(action = "rate_limited", endpoint = "signup", "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    // Hash the password before anything touches the store
    let credential = Credential::new(&req.password)
        .map_err(|e| AppError::Internal(format!("Credential error: {}", e)))?;

    // Uniqueness conflicts surface from the storage layer as 422; no session
    // is established on that path.
    let user =
        storage::user::create_user(&mut con, &req.username, credential, req.image_url, req.bio)
            .await?;

    let body = establish_session(&mut con, &state, &user).await?;

    tracing::info!(action = "signup", user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /login — Verify credentials and establish session
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut con = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))?;

    let rate_limit_key = format!("ratelimit:auth:{}", addr.ip());
    let allowed = check_rate_limit(
        &mut con,
        &rate_limit_key,
        state.config.rate_limit_auth_per_min,
        60,
    )
    .await
    .map_err(|e| AppError::Internal(format!("Rate limit check failed: {}", e)))?;

    if !allowed {
        tracing::warn!(action = "rate_limited", endpoint = "login", "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    // Unknown username and wrong password take the same path: one generic
    // 401, no hint which half failed.
    let user = storage::user::get_user_by_username(&mut con, &req.username).await?;

    let user = match user {
        Some(user) if user.credential.verify(&req.password) => user,
        _ => {
            tracing::warn!(action = "auth_failed", username = %req.username, "Invalid credentials");
            return Err(AppError::Unauthorized("401 Unauthorized".to_string()));
        }
    };

    let body = establish_session(&mut con, &state, &user).await?;

    tracing::info!(action = "auth_success", user_id = user.id, username = %user.username, "User logged in");

    Ok((StatusCode::OK, Json(body)))
}

/// GET /check_session — Resolve the ambient session, if any
///
/// Public route: a missing or dead session answers 401 with an empty JSON
/// object rather than an error body. A stale session whose user no longer
/// exists is treated the same way, never as a fault.
pub async fn check_session(
    State(state): State<AppState>,
    session: Option<AuthSession>,
) -> Result<Response, AppError> {
    let Some(session) = session else {
        return Ok((StatusCode::UNAUTHORIZED, Json(json!({}))).into_response());
    };

    let mut con = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))?;

    match storage::user::get_user(&mut con, session.user_id).await? {
        Some(user) => Ok((StatusCode::OK, Json(UserView::from(&user))).into_response()),
        None => Ok((StatusCode::UNAUTHORIZED, Json(json!({}))).into_response()),
    }
}

/// DELETE /logout — Clear the session
///
/// Requires a bearer token to be presented but not to be live: deleting an
/// already-dead session is a no-op, so repeated logouts all return 204.
pub async fn logout(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut con = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))?;

    storage::session::delete_session(&mut con, &token).await?;

    tracing::info!(action = "logout", "Session cleared");

    Ok(StatusCode::NO_CONTENT)
}
