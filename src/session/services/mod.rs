//! Application services for session management.

mod auth;
mod context;

pub use auth::{AuthError, AuthResult, AuthService};
pub use context::{SessionContext, SessionStatus};
