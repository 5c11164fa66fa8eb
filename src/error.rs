use actix_web::body::BoxBody;
use actix_web::error::BlockingError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::poster::PosterError;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, ApiError>;

const INTERNAL_ERROR_MESSAGE: &str = "An unspecified internal error occurred";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    InvalidPoster(#[from] PosterError),
    #[error("invalid genre ID: {0}")]
    InvalidGenre(i32),
    #[error("genre name must not be empty")]
    InvalidGenreName,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("rate must be a finite number")]
    InvalidRate,
    #[error("no movie found with ID: {0}")]
    MovieNotFound(i32),
    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
    #[error("Blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPoster(_)
            | ApiError::InvalidGenre(_)
            | ApiError::InvalidGenreName
            | ApiError::TooLong { .. }
            | ApiError::InvalidRate => StatusCode::BAD_REQUEST,
            ApiError::MovieNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let message = if status.is_server_error() {
            log::error!("{}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            log::debug!("Rejected request: {}", self);
            self.to_string()
        };
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(message)
    }
}
