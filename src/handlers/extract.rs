// handlers/extract.rs - Extractors whose rejections become problem responses

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::features::tasks::not_found;

/// JSON body; malformed or mistyped input is a Validation failure.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}

/// The `:id` segment of a task route. Anything that is not a UUID cannot name
/// a task, so it is reported as not found.
#[derive(Debug, Clone, Copy)]
pub struct TaskId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Task was not found."))?;

        raw.parse::<Uuid>().map(TaskId).map_err(|_| not_found(raw))
    }
}
