//! Recipe Redis operations.
//!
//! Redis key patterns:
//! - `recipe:next_id` — id counter (INCR)
//! - `recipe:{id}` — recipe data (JSON)
//! - `user_recipes:{user_id}` — SET of recipe ids owned by the user
//!
//! Title and instructions constraints are checked here, before anything is
//! written, so a rejected payload leaves no partial state behind.

use crate::models::StoredRecipe;
use crate::storage::StorageError;
use redis::AsyncCommands;

/// Minimum instructions length, in characters.
pub const MIN_INSTRUCTIONS_CHARS: usize = 50;

/// Validate the recipe field constraints.
fn check_constraints(title: &str, instructions: &str) -> Result<(), StorageError> {
    if title.is_empty() {
        return Err(StorageError::ConstraintViolation(
            "title must be present".to_string(),
        ));
    }
    if instructions.chars().count() < MIN_INSTRUCTIONS_CHARS {
        return Err(StorageError::ConstraintViolation(format!(
            "instructions must be at least {} characters",
            MIN_INSTRUCTIONS_CHARS
        )));
    }
    Ok(())
}

/// Create a recipe owned by `user_id`.
///
/// The owner reference is fixed at creation; no update path exists.
pub async fn create_recipe<C>(
    con: &mut C,
    title: &str,
    instructions: &str,
    minutes_to_complete: Option<u32>,
    user_id: u64,
) -> Result<StoredRecipe, StorageError>
where
    C: AsyncCommands,
{
    check_constraints(title, instructions)?;

    let id: u64 = con.incr("recipe:next_id", 1).await?;

    let recipe = StoredRecipe {
        id,
        title: title.to_string(),
        instructions: instructions.to_string(),
        minutes_to_complete,
        user_id,
        created_at: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs(),
    };

    let recipe_key = format!("recipe:{}", id);
    let json = serde_json::to_string(&recipe)?;
    con.set::<_, _, ()>(&recipe_key, json).await?;

    // Index the recipe under its owner
    let user_recipes_key = format!("user_recipes:{}", user_id);
    con.sadd::<_, _, ()>(&user_recipes_key, id).await?;

    Ok(recipe)
}

/// List all recipes owned by `user_id`, ordered by id.
///
/// An identity with no recipes yields an empty vec, not an error.
pub async fn list_for_user<C>(con: &mut C, user_id: u64) -> Result<Vec<StoredRecipe>, StorageError>
where
    C: AsyncCommands,
{
    let user_recipes_key = format!("user_recipes:{}", user_id);
    let mut ids: Vec<u64> = con.smembers(&user_recipes_key).await?;
    ids.sort_unstable();

    let mut recipes = Vec::with_capacity(ids.len());
    for id in ids {
        let key = format!("recipe:{}", id);
        let json: Option<String> = con.get(&key).await?;
        if let Some(data) = json {
            recipes.push(serde_json::from_str(&data)?);
        }
    }

    Ok(recipes)
}
