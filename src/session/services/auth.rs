//! Sign-in, registration and profile orchestration.

use super::SessionContext;
use crate::gateway::ApiError;
use crate::session::{
    domain::{
        GoogleLoginRequest, LoginRequest, ProfileUpdate, RegistrationRequest, SessionDomainError,
        User,
    },
    ports::{AuthGateway, TokenStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Local validation failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] SessionDomainError),
    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] ApiError),
    /// The token could not be persisted or removed.
    #[error(transparent)]
    Storage(#[from] TokenStoreError),
    /// The operation requires a signed-in session.
    #[error("not signed in")]
    NotSignedIn,
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication orchestration service.
#[derive(Clone)]
pub struct AuthService<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
    session: Arc<SessionContext>,
}

impl<G> AuthService<G>
where
    G: AuthGateway,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(gateway: Arc<G>, session: Arc<SessionContext>) -> Self {
        Self { gateway, session }
    }

    /// Signs in and installs the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the credentials are malformed, the server
    /// rejects them, or the token cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let request = LoginRequest::new(email, password)?;
        let auth = self.gateway.login(&request).await.map_err(ApiError::from)?;
        let user = auth.user.clone();
        self.session.establish(auth)?;
        info!(email = request.email(), "signed in");
        Ok(user)
    }

    /// Exchanges a Google ID token for a session and installs it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the token is blank, the server rejects it,
    /// or the issued token cannot be persisted.
    pub async fn google_login(&self, id_token: &str) -> AuthResult<User> {
        let request = GoogleLoginRequest::new(id_token)?;
        let auth = self
            .gateway
            .google_login(&request)
            .await
            .map_err(ApiError::from)?;
        let user = auth.user.clone();
        self.session.establish(auth)?;
        info!(email = user.email(), "signed in with Google");
        Ok(user)
    }

    /// Creates an account and installs the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the input is malformed, the server rejects
    /// it, or the token cannot be persisted.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        avatar: Option<&str>,
    ) -> AuthResult<User> {
        let mut request = RegistrationRequest::new(name, email, password)?;
        if let Some(url) = avatar {
            request = request.with_avatar(url);
        }
        let auth = self
            .gateway
            .register(&request)
            .await
            .map_err(ApiError::from)?;
        let user = auth.user.clone();
        self.session.establish(auth)?;
        info!(email = request.email(), "registered account");
        Ok(user)
    }

    /// Updates the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] without a session,
    /// [`AuthError::Validation`] for an empty update, or
    /// [`AuthError::Gateway`] when the server rejects it.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AuthResult<User> {
        update.validate()?;
        self.require_session()?;
        let user = self
            .gateway
            .update_profile(update)
            .await
            .map_err(ApiError::from)?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// Fetches the user behind the current token, e.g. after a restore.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] without a session or
    /// [`AuthError::Gateway`] when the lookup fails.
    pub async fn refresh_user(&self) -> AuthResult<User> {
        self.require_session()?;
        let user = self
            .gateway
            .current_user()
            .await
            .map_err(ApiError::from)?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// Signs out locally; the server keeps no session to revoke.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] when the persisted token cannot be
    /// removed.
    pub fn logout(&self) -> AuthResult<()> {
        self.session.sign_out()?;
        info!("signed out");
        Ok(())
    }

    fn require_session(&self) -> AuthResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::NotSignedIn)
        }
    }
}
