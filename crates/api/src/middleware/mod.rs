//! Request extractors that run before handler bodies.
//!
//! - [`auth::RequireAuth`] -- rejects requests the configured [`Authorizer`](crate::auth::Authorizer) denies.

pub mod auth;
