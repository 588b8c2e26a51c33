use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use st_core::Error;

#[derive(Debug, Serialize)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<Error> for ErrorServer {
    fn from(error: Error) -> Self {
        let status = if error.is_input_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            message: error.to_string(),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
