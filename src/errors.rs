use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("Invalid URL. Please enter a valid URL starting with http or https.")]
    InvalidUrl,
    #[error("URL not found or expired")]
    NotFound,
    #[error("This URL has expired")]
    Expired,
    #[error("Short code is reserved: {0}")]
    ReservedCode(String),
    #[error("Short code already in use: {0}")]
    CodeTaken(String),
    #[error("Something went wrong during redirection.")]
    Upstream(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShortenerError>;

impl ResponseError for ShortenerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShortenerError::InvalidUrl | ShortenerError::ReservedCode(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortenerError::NotFound => StatusCode::NOT_FOUND,
            ShortenerError::Expired => StatusCode::GONE,
            ShortenerError::CodeTaken(_) => StatusCode::CONFLICT,
            ShortenerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ShortenerError::Storage(_) | ShortenerError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
