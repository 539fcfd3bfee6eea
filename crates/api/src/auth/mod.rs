//! Authorization gate for mutating routes.
//!
//! - [`Authorizer`] -- the capability a route consults before it mutates anything.
//! - [`JwtAuthorizer`] -- accepts requests carrying a valid HS256 Bearer token.
//! - [`jwt`] -- token minting and validation.

pub mod jwt;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use self::jwt::{validate_token, JwtConfig};

/// Identity attached to an authorized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthDenied {
    #[error("Missing Authorization header")]
    MissingCredentials,
    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    MalformedCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Decides whether a request may run a mutating operation.
///
/// Implementations inspect request headers only; they never see the body,
/// so a denial always happens before payload validation.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> Result<Principal, AuthDenied>;
}

/// Bearer-token authorizer backed by [`JwtConfig`].
#[derive(Debug, Clone)]
pub struct JwtAuthorizer {
    config: JwtConfig,
}

impl JwtAuthorizer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl Authorizer for JwtAuthorizer {
    fn authorize(&self, headers: &HeaderMap) -> Result<Principal, AuthDenied> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthDenied::MissingCredentials)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthDenied::MalformedCredentials)?;

        let claims =
            validate_token(token, &self.config).map_err(|_| AuthDenied::InvalidToken)?;

        Ok(Principal {
            subject: claims.sub,
        })
    }
}
