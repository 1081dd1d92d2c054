//! REST adapter for the authentication endpoints.

use crate::gateway::{GatewayResult, HttpGateway};
use crate::session::{
    domain::{
        AuthResponse, GoogleLoginRequest, LoginRequest, ProfileUpdate, RegistrationRequest, User,
    },
    ports::AuthGateway,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

/// User payload, bare or wrapped as `{ "user": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse> {
        self.send_json(Method::POST, &["auth", "login"], request).await
    }

    async fn google_login(&self, request: &GoogleLoginRequest) -> GatewayResult<AuthResponse> {
        self.send_json(Method::POST, &["auth", "google"], request).await
    }

    async fn register(&self, request: &RegistrationRequest) -> GatewayResult<AuthResponse> {
        self.send_json(Method::POST, &["auth", "register"], request).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<User> {
        let envelope: UserEnvelope = self
            .send_json(Method::PUT, &["auth", "profile"], update)
            .await?;
        Ok(envelope.into_user())
    }

    async fn current_user(&self) -> GatewayResult<User> {
        let envelope: UserEnvelope = self.get_json(&["auth", "me"]).await?;
        Ok(envelope.into_user())
    }
}
