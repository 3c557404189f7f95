//! API route handlers.

pub mod auth;
pub mod recipe;

use crate::auth::middleware::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

/// Build the API router with all endpoints.
///
/// Public routes: signup, login, check_session. Everything else extracts an
/// `AuthSession` and fails 401 before the handler body runs.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/check_session", get(auth::check_session))
        .route("/logout", delete(auth::logout))
        // Recipe endpoints
        .route(
            "/recipes",
            get(recipe::list_recipes).post(recipe::create_recipe),
        )
}
