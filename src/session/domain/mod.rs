//! Domain model for the authenticated client session.

mod credentials;
mod error;
mod token;
mod user;

pub use credentials::{GoogleLoginRequest, LoginRequest, ProfileUpdate, RegistrationRequest};
pub use error::SessionDomainError;
pub use token::SessionToken;
pub use user::{AuthResponse, User, UserRole};
