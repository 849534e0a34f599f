use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use murmur_crypto::tokens::normalize_credential;
use murmur_db::Tables;

use crate::error::ApiError;

/// Normalized bearer token from the `Authorization` header, if any.
///
/// Extraction never fails; resolving the token to a user happens later,
/// under the same lock as whatever the handler does with that user.
#[derive(Debug, Clone, Default)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(raw: &str) -> Self {
        let token = normalize_credential(raw);
        Self((!token.is_empty()).then_some(token))
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Index of the caller in `tables`, if the token belongs to someone.
    pub fn resolve(&self, tables: &Tables) -> Option<usize> {
        self.token().and_then(|t| tables.user_index_by_token(t))
    }

    pub fn require(&self, tables: &Tables) -> Result<usize, ApiError> {
        self.resolve(tables).ok_or(ApiError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(Credential::new)
            .unwrap_or_default())
    }
}
