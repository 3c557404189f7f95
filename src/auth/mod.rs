//! Authentication layer for credential hashing and session management.

pub mod middleware;
pub mod password;
pub mod session;

pub use middleware::{check_rate_limit, AppState, AuthSession, BearerToken};
pub use password::Credential;
pub use session::generate_session_token;
