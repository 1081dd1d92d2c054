//! Credential and profile payloads sent to the authentication endpoints.

use super::SessionDomainError;
use serde::Serialize;
use std::fmt;

fn validated_email(email: impl Into<String>) -> Result<String, SessionDomainError> {
    let raw = email.into();
    let trimmed = raw.trim();
    let plausible = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
        && !trimmed.chars().any(char::is_whitespace);
    if !plausible {
        return Err(SessionDomainError::InvalidEmail(raw));
    }
    Ok(trimmed.to_owned())
}

fn validated_password(password: impl Into<String>) -> Result<String, SessionDomainError> {
    let secret = password.into();
    if secret.is_empty() {
        return Err(SessionDomainError::EmptyPassword);
    }
    Ok(secret)
}

fn validated_name(name: impl Into<String>) -> Result<String, SessionDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SessionDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    /// Creates a validated login request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidEmail`] or
    /// [`SessionDomainError::EmptyPassword`].
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        Ok(Self {
            email: validated_email(email)?,
            password: validated_password(password)?,
        })
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/google`: an ID token issued by Google sign-in.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct GoogleLoginRequest {
    token: String,
}

impl GoogleLoginRequest {
    /// Wraps a Google ID token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyIdentityToken`] for a blank token.
    pub fn new(token: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = token.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionDomainError::EmptyIdentityToken);
        }
        Ok(Self {
            token: trimmed.to_owned(),
        })
    }
}

impl fmt::Debug for GoogleLoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleLoginRequest")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    name: String,
    email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

impl RegistrationRequest {
    /// Creates a validated registration request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyName`],
    /// [`SessionDomainError::InvalidEmail`] or
    /// [`SessionDomainError::EmptyPassword`].
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        Ok(Self {
            name: validated_name(name)?,
            email: validated_email(email)?,
            password: validated_password(password)?,
            avatar: None,
        })
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("avatar", &self.avatar)
            .finish()
    }
}

/// Body of `PUT /auth/profile`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

impl ProfileUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyName`] for a blank name.
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, SessionDomainError> {
        self.name = Some(validated_name(name)?);
        Ok(self)
    }

    /// Changes the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Checks that the update changes something.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyProfileUpdate`] when no field is
    /// set.
    pub const fn validate(&self) -> Result<(), SessionDomainError> {
        if self.name.is_none() && self.avatar.is_none() {
            return Err(SessionDomainError::EmptyProfileUpdate);
        }
        Ok(())
    }
}
