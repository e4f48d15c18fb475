// src/handlers/mod.rs

use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub mod comments;
pub mod news;
pub mod users;

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Numeric `{id}` path segment. Anything that is not an id cannot name a
/// row, so it is answered with 404 like an unknown id.
#[derive(Debug, Clone, Copy)]
pub struct ObjectId(pub i64);

impl<S> FromRequestParts<S> for ObjectId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || AppError::NotFound("Страница не найдена".to_string());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;

        raw.parse::<i64>().map(ObjectId).map_err(|_| not_found())
    }
}
