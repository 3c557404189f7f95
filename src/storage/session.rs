//! Session Redis operations.
//!
//! Redis key patterns:
//! - `session:{token}` — session data (JSON), expiring with the session TTL
//!
//! Session JSON carries the opaque token, so reads are wrapped in
//! `zeroize::Zeroizing` to clear the raw blob after deserialization. Redis
//! keeps its own copy in its memory space; this protects the application
//! layer only.

use crate::models::StoredSession;
use crate::storage::StorageError;
use redis::AsyncCommands;
use zeroize::Zeroizing;

/// Store a session in Redis with TTL.
pub async fn store_session<C>(
    con: &mut C,
    session: &StoredSession,
    ttl_secs: u64,
) -> Result<(), StorageError>
where
    C: AsyncCommands,
{
    let session_key = format!("session:{}", session.token);
    let json = serde_json::to_string(session)?;

    con.set_ex::<_, _, ()>(&session_key, json, ttl_secs).await?;

    Ok(())
}

/// Get a session by token.
///
/// The session JSON is zeroized after deserialization.
pub async fn get_session<C>(con: &mut C, token: &str) -> Result<Option<StoredSession>, StorageError>
where
    C: AsyncCommands,
{
    let key = format!("session:{}", token);
    let json: Option<String> = con.get(&key).await?;

    match json {
        Some(data) => {
            // Wrap the JSON string in Zeroizing to clear it after use
            let zeroizing_data = Zeroizing::new(data);
            let session = serde_json::from_str(&zeroizing_data)?;
            // zeroizing_data is automatically zeroized when dropped here
            Ok(Some(session))
        }
        None => Ok(None),
    }
}

/// Delete a session from Redis.
///
/// Returns true if the session was deleted, false if it didn't exist.
/// Deleting an absent session is not an error; logout leans on this for
/// idempotency.
pub async fn delete_session<C>(con: &mut C, token: &str) -> Result<bool, StorageError>
where
    C: AsyncCommands,
{
    let key = format!("session:{}", token);
    let deleted: i32 = con.del(&key).await?;

    Ok(deleted > 0)
}
