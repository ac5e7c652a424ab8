use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Profile not found")]
    NotFound,

    #[error("Slug already taken")]
    SlugTaken,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Media store error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Record store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Search error: {0}")]
    Search(#[from] meilisearch_sdk::errors::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("QR error: {0}")]
    Qr(#[from] qrcode::types::QrError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::SlugTaken => (StatusCode::CONFLICT, "slug_taken"),
            AppError::MalformedPayload => (StatusCode::BAD_REQUEST, "malformed_payload"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        // details stay in the logs, the client only sees the state code
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {self}");
        }

        (status, Json(json!({ "error": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::SlugTaken.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::MalformedPayload.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Encoding(serde_json::from_str::<u32>("x").unwrap_err())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
