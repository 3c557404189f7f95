//! Redis storage layer for users, recipes, and sessions.
//!
//! All functions are async and use redis::AsyncCommands.
//! Data is serialized to JSON for storage in Redis.
//!
//! Uniqueness and field constraints are enforced here, at the boundary to the
//! store, and surface as typed variants the handler layer maps to 422.

pub mod recipe;
pub mod session;
pub mod user;

/// Storage layer error type.
///
/// `UniqueViolation` and `ConstraintViolation` are expected business
/// outcomes; `Redis` and `Json` are transport faults.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    UniqueViolation(String),

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
