use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Invalid game config: {0}")]
    InvalidConfig(String),
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = match self {
            QuizError::UnknownRegion { .. } => StatusCode::BAD_REQUEST,
            QuizError::InvalidConfig { .. } => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}
