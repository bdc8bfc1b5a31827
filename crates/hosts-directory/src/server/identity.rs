//! Caller identity extraction
//!
//! Authentication happens upstream (a reverse proxy or an outer middleware).
//! This service only reads the result: a [`CallerId`] request extension if a
//! middleware inserted one, otherwise the `x-user-id` header. Anything absent
//! or unparsable is treated as [`CallerId::ANONYMOUS`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hosts_directory_storage::CallerId;
use std::convert::Infallible;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor wrapping the authenticated caller's id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub CallerId);

impl Caller {
    fn from_parts(parts: &Parts) -> CallerId {
        if let Some(id) = parts.extensions.get::<CallerId>() {
            return *id;
        }

        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(CallerId::new)
            .unwrap_or(CallerId::ANONYMOUS)
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(Self::from_parts(parts)))
    }
}
