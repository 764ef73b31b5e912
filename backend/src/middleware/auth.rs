//! Authentication extractor
//!
//! The gateway does not validate tokens itself; the billing API does. It only
//! requires a bearer token to be present and forwards it upstream.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;

/// Bearer token of the incoming request
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Unauthorized("Missing or invalid Authorization header".to_string())
                })?;

        let token = bearer.token().trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("Empty bearer token".to_string()));
        }

        Ok(BearerToken(token.to_string()))
    }
}
