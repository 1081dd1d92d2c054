//! Unit tests for session management.


use crate::session::domain::{AuthResponse, SessionToken, User};

/// Builds the response the server sends after a successful sign-in.
fn auth_response(token: &str) -> AuthResponse {
    AuthResponse {
        user: User::new("u-1", "Ada", "ada@example.com"),
        token: SessionToken::new(token).expect("valid token"),
    }
}
