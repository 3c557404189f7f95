//! Recipe API endpoints, scoped to the session identity.

use crate::auth::middleware::{AppState, AuthSession};
use crate::error::AppError;
use crate::models::{CreateRecipeRequest, RecipeView};
use crate::storage;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// GET /recipes — List the session identity's recipes
///
/// Only the owner's recipes are returned, each with the owner embedded. An
/// empty collection is a 200 with `[]`.
pub async fn list_recipes(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut con = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))?;

    // A live session whose user vanished is stale, not a fault
    let owner = storage::user::get_user(&mut con, session.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("401 Unauthorized".to_string()))?;

    let recipes = storage::recipe::list_for_user(&mut con, owner.id).await?;

    let views: Vec<RecipeView> = recipes
        .into_iter()
        .map(|recipe| RecipeView::new(recipe, &owner))
        .collect();

    Ok((StatusCode::OK, Json(views)))
}

/// POST /recipes — Create a recipe owned by the session identity
///
/// The owner is always the session's user; the request body has no owner
/// field to ignore. Constraint violations surface from the storage layer
/// as 422 with nothing persisted.
pub async fn create_recipe(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut con = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))?;

    let owner = storage::user::get_user(&mut con, session.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("401 Unauthorized".to_string()))?;

    let recipe = storage::recipe::create_recipe(
        &mut con,
        &req.title,
        &req.instructions,
        req.minutes_to_complete,
        owner.id,
    )
    .await?;

    tracing::info!(
        action = "recipe_created",
        recipe_id = recipe.id,
        user_id = owner.id,
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(RecipeView::new(recipe, &owner))))
}
