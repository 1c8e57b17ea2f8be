//! Path parameters, rejected as `AppError` so undecodable segments get the usual error body.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct KeyPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for KeyPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(KeyPath(value))
    }
}
