use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid movie record: {0}")]
    InvalidMovie(String),

    #[error("Preference profile is empty: select at least one genre, actor, or director")]
    EmptyPreference,

    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("No catalog provider configured")]
    ProviderUnavailable,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::EmptyPreference | AppError::InvalidInput(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::MovieNotFound(_) | AppError::UnknownGenre(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::InvalidMovie(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::ProviderUnavailable => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::Catalog(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
