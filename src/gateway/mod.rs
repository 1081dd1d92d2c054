//! Client side of the remote REST API.
//!
//! [`HttpGateway`] shapes outbound requests (JSON or multipart), attaches the
//! session's bearer token and normalises every failure into
//! [`GatewayError`]. The task and session modules implement their gateway
//! ports on top of it.

mod client;
mod error;

pub use client::HttpGateway;
pub use error::{
    ApiError, FALLBACK_ERROR_MESSAGE, GatewayError, GatewayResult, SESSION_EXPIRED_MESSAGE,
};
