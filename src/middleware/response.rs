use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Success half of a handler's HTTP reply. Bodies are sent bare, with no envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
    pub location: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::OK,
            location: None,
        }
    }

    /// 201 Created, pointing at where the new resource can be fetched
    pub fn created(data: T, location: impl Into<String>) -> Self {
        Self {
            data,
            status_code: StatusCode::CREATED,
            location: Some(location.into()),
        }
    }
}

impl ApiResponse<()> {
    /// 204 No Content
    pub fn no_content() -> Self {
        Self {
            data: (),
            status_code: StatusCode::NO_CONTENT,
            location: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        if self.status_code == StatusCode::NO_CONTENT {
            return self.status_code.into_response();
        }

        let mut response = (self.status_code, Json(self.data)).into_response();

        if let Some(location) = self.location {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(e) => tracing::warn!("Dropping unencodable Location {}: {}", location, e),
            }
        }

        response
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::AppError>;
