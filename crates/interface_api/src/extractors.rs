//! Request extractors that reject with [`ApiError`]
//!
//! axum's own rejections are plain text; these wrap `Json`, `Query` and
//! `Path` so that malformed input yields the structured 400 body, and run the
//! `validator` rules of the target type.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use core_kernel::ExpenseId;

use crate::error::ApiError;

/// JSON body, deserialized and validated
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid("body", e.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// Query string, deserialized and validated
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid("query", e.body_text()))?;
        value.validate()?;
        Ok(ValidQuery(value))
    }
}

/// `:id` path segment parsed as an expense id
pub struct ExpenseIdPath(pub ExpenseId);

#[async_trait]
impl<S> FromRequestParts<S> for ExpenseIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid("id", e.body_text()))?;
        let id = raw
            .parse::<ExpenseId>()
            .map_err(|_| ApiError::invalid("id", format!("'{}' is not a valid expense id", raw)))?;
        Ok(ExpenseIdPath(id))
    }
}
