//! User Redis operations.
//!
//! Redis key patterns:
//! - `user:next_id` — id counter (INCR)
//! - `user:{id}` — individual user data (JSON)
//! - `username:{username}` — username reservation, maps to user id (STRING)
//!
//! The `username:{username}` key is written with SET NX and is the single
//! arbiter of uniqueness: whichever concurrent signup wins the NX write owns
//! the name, the loser gets a `UniqueViolation`.
//!
//! User JSON contains the credential hash, so reads are wrapped in
//! `zeroize::Zeroizing` to clear the raw blob after deserialization.

use crate::auth::password::Credential;
use crate::models::StoredUser;
use crate::storage::StorageError;
use redis::AsyncCommands;
use zeroize::Zeroizing;

/// Create a user, enforcing username presence and uniqueness.
///
/// Allocates a numeric id from the `user:next_id` counter. If the username
/// reservation is lost the id is burned; ids are opaque and gaps are fine.
pub async fn create_user<C>(
    con: &mut C,
    username: &str,
    credential: Credential,
    image_url: Option<String>,
    bio: Option<String>,
) -> Result<StoredUser, StorageError>
where
    C: AsyncCommands,
{
    if username.is_empty() {
        return Err(StorageError::ConstraintViolation(
            "username must be present".to_string(),
        ));
    }

    let id: u64 = con.incr("user:next_id", 1).await?;

    // Reserve the username. NX fails if any user already holds it.
    let username_key = format!("username:{}", username);
    let reserved: bool = con.set_nx(&username_key, id).await?;
    if !reserved {
        return Err(StorageError::UniqueViolation(
            "username already taken".to_string(),
        ));
    }

    let user = StoredUser {
        id,
        username: username.to_string(),
        credential,
        image_url,
        bio,
        created_at: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs(),
    };

    let user_key = format!("user:{}", id);
    let json = serde_json::to_string(&user)?;
    con.set::<_, _, ()>(&user_key, json).await?;

    Ok(user)
}

/// Get a user by id.
///
/// The user JSON is zeroized after deserialization.
pub async fn get_user<C>(con: &mut C, id: u64) -> Result<Option<StoredUser>, StorageError>
where
    C: AsyncCommands,
{
    let key = format!("user:{}", id);
    let json: Option<String> = con.get(&key).await?;

    match json {
        Some(data) => {
            // Wrap the JSON string in Zeroizing to clear it after use
            let zeroizing_data = Zeroizing::new(data);
            let user = serde_json::from_str(&zeroizing_data)?;
            // zeroizing_data is automatically zeroized when dropped here
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

/// Get a user by username.
///
/// Performs a two-step lookup: username -> user id -> user data.
pub async fn get_user_by_username<C>(
    con: &mut C,
    username: &str,
) -> Result<Option<StoredUser>, StorageError>
where
    C: AsyncCommands,
{
    let username_key = format!("username:{}", username);
    let user_id: Option<u64> = con.get(&username_key).await?;

    match user_id {
        Some(id) => get_user(con, id).await,
        None => Ok(None),
    }
}
