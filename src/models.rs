//! Request and response models for the API.
//!
//! All models use serde for serialization/deserialization.
//! Storage models represent Redis data structures.

use serde::{Deserialize, Serialize};

use crate::auth::password::Credential;

// ============================================================================
// Auth Models
// ============================================================================

/// Request to create a new account.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

/// Request to log in with existing credentials.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response after establishing a session (signup or login).
///
/// The identity's public fields plus the opaque session token the client
/// sends back in the Authorization header.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: UserView,
}

// ============================================================================
// Recipe Models
// ============================================================================

/// Request to create a recipe. The owner is never part of the payload; it is
/// always the session identity.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<u32>,
}

/// A recipe as returned by the API, with its owner embedded.
#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub id: u64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<u32>,
    pub user: UserView,
}

impl RecipeView {
    pub fn new(recipe: StoredRecipe, owner: &StoredUser) -> Self {
        RecipeView {
            id: recipe.id,
            title: recipe.title,
            instructions: recipe.instructions,
            minutes_to_complete: recipe.minutes_to_complete,
            user: UserView::from(owner),
        }
    }
}

// ============================================================================
// Identity Views
// ============================================================================

/// Public fields of a user. Used both as the top-level identity response and
/// as the owner embedded in a recipe; it carries no recipe list and no
/// credential, so the nesting cannot recurse or leak.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: u64,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<&StoredUser> for UserView {
    fn from(user: &StoredUser) -> Self {
        UserView {
            id: user.id,
            username: user.username.clone(),
            image_url: user.image_url.clone(),
            bio: user.bio.clone(),
        }
    }
}

// ============================================================================
// Storage Models
// ============================================================================

/// User data as stored in Redis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: u64,
    pub username: String,
    pub credential: Credential,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: u64,
}

/// Recipe data as stored in Redis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub id: u64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<u32>,
    pub user_id: u64,
    pub created_at: u64,
}

/// Session data as stored in Redis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user_id: u64,
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> StoredUser {
        StoredUser {
            id: 7,
            username: "ada".to_string(),
            credential: Credential::new("hunter2hunter2").unwrap(),
            image_url: Some("https://example.com/ada.png".to_string()),
            bio: None,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_user_view_has_no_credential_field() {
        let view = UserView::from(&test_user());
        let json = serde_json::to_value(&view).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "ada");
        assert!(obj.get("credential").is_none());
        assert!(obj.get("password").is_none());
    }

    #[test]
    fn test_session_response_flattens_user_fields() {
        let user = test_user();
        let resp = SessionResponse {
            token: "tok".to_string(),
            user: UserView::from(&user),
        };
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["token"], "tok");
        assert_eq!(json["username"], "ada");
        assert!(json.get("user").is_none());
    }

    #[test]
    fn test_recipe_view_embeds_owner_without_recipes() {
        let user = test_user();
        let recipe = StoredRecipe {
            id: 3,
            title: "Toast".to_string(),
            instructions: "a".repeat(50),
            minutes_to_complete: Some(5),
            user_id: user.id,
            created_at: 1_700_000_001,
        };
        let view = RecipeView::new(recipe, &user);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["user"]["id"], 7);
        assert!(json["user"].get("recipes").is_none());
        assert!(json["user"].get("credential").is_none());
    }

    #[test]
    fn test_stored_user_round_trips_through_json() {
        let user = test_user();
        let json = serde_json::to_string(&user).unwrap();
        let back: StoredUser = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, user.id);
        assert_eq!(back.username, user.username);
        // The credential survives storage and still verifies
        assert!(back.credential.verify("hunter2hunter2"));
        assert!(!back.credential.verify("wrong"));
    }
}
