//! Remote authentication endpoints.

use crate::gateway::GatewayResult;
use crate::session::domain::{
    AuthResponse, GoogleLoginRequest, LoginRequest, ProfileUpdate, RegistrationRequest, User,
};
use async_trait::async_trait;

/// Contract for the REST authentication endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse>;

    /// `POST /auth/google`, exchanging a Google ID token for a session.
    async fn google_login(&self, request: &GoogleLoginRequest) -> GatewayResult<AuthResponse>;

    /// `POST /auth/register`.
    async fn register(&self, request: &RegistrationRequest) -> GatewayResult<AuthResponse>;

    /// `PUT /auth/profile`, returning the updated user.
    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<User>;

    /// `GET /auth/me`, returning the user behind the current token.
    async fn current_user(&self) -> GatewayResult<User>;
}
