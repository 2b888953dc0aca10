//! Extractors whose rejections use the response envelope
//!
//! Thin wrappers over axum's `Json`, `Query` and `Path` that turn a
//! malformed body, query string or path segment into a 400 `AppError`.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use shared::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

/// Rejection body text as a validation-style error
fn rejected(rejection: impl std::fmt::Display) -> AppError {
    tracing::debug!(reason = %rejection, "Request rejected by extractor");
    AppError::invalid_request(rejection.to_string())
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(rejected)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(rejected)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(rejected)?;
        Ok(Self(value))
    }
}
