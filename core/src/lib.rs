pub mod error;
pub mod oracle;
pub mod scoring;
pub mod services;
pub mod types;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

use crate::error::IndexError;
use crate::oracle::OracleError;

pub use dashmap;

pub type IndexResult<T> = Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to parse JSON")]
    JsonParseError(#[from] serde_json::Error),

    #[error(transparent)]
    IndexError(#[from] IndexError),

    #[error(transparent)]
    OracleError(#[from] OracleError),

    #[error("{0}")]
    CustomError(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        tracing::error!("API error: {:?}", self);

        let json_error = json!({
            "error": self.to_string(),
        });

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json_error)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::JsonParseError(_) => StatusCode::BAD_REQUEST,
            ApiError::IndexError(e) => match e {
                IndexError::NotFound(_) => StatusCode::NOT_FOUND,
                IndexError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                IndexError::InvalidState(_) => StatusCode::CONFLICT,
                IndexError::Unauthorized => StatusCode::UNAUTHORIZED,
                IndexError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                IndexError::Forbidden => StatusCode::FORBIDDEN,
            },
            ApiError::OracleError(_) => StatusCode::BAD_GATEWAY,
            ApiError::CustomError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
