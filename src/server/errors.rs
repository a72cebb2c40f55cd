use crate::error::ResumeMatchError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Handler error type. Every variant renders as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Match(#[from] ResumeMatchError),

    #[error("Malformed multipart upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Match(e) => match e {
                ResumeMatchError::MissingInput
                | ResumeMatchError::InvalidInput(_)
                | ResumeMatchError::UnsupportedFormat(_)
                | ResumeMatchError::PdfExtraction(_)
                | ResumeMatchError::TextProcessing(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            log::error!("Request failed: {:#}", self);
            "An internal server error occurred".to_string()
        } else {
            log::warn!("Rejected request: {}", self);
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(ResumeMatchError::MissingInput).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ResumeMatchError::UnsupportedFormat("docx".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ResumeMatchError::Catalog("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("join failed")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_input_message_is_bare() {
        assert_eq!(AppError::from(ResumeMatchError::MissingInput).to_string(), "Resume or JD missing");
    }
}
