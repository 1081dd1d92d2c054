//! Error types for session domain validation.

use thiserror::Error;

/// Errors returned while constructing session and credential values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// The bearer token is empty after trimming.
    #[error("session token must not be empty")]
    EmptyToken,

    /// The identity-provider token is empty after trimming.
    #[error("identity token must not be empty")]
    EmptyIdentityToken,

    /// The display name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The email address is not plausibly an address.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// A profile update changes nothing.
    #[error("profile update must change at least one field")]
    EmptyProfileUpdate,
}
