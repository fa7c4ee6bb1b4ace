use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Auth(String),
    Validation(String),
    Conflict(String),
    Permission(String),
    UploadUrl(String),
    Transfer(String),
    CompleteUpload(String),
    Publicize(String),
    Upstream(String),
    Internal(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "auth_failed",
            AppError::Validation(_) => "invalid_request",
            AppError::Conflict(_) => "name_taken",
            AppError::Permission(_) => "missing_scope",
            AppError::UploadUrl(_) => "upload_url_failed",
            AppError::Transfer(_) => "transfer_failed",
            AppError::CompleteUpload(_) => "complete_upload_failed",
            AppError::Publicize(_) => "publicize_failed",
            AppError::Upstream(_) => "upstream_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Permission(_) => StatusCode::FORBIDDEN,
            AppError::UploadUrl(_) => StatusCode::BAD_REQUEST,
            AppError::Transfer(_) => StatusCode::BAD_REQUEST,
            AppError::CompleteUpload(_) => StatusCode::BAD_REQUEST,
            AppError::Publicize(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Upstream(detail) => {
                tracing::error!("upstream slack failure: {detail}");
                format!("upstream slack failure: {detail}")
            }
            AppError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                format!("internal server error: {detail}")
            }
            AppError::Auth(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Permission(msg)
            | AppError::UploadUrl(msg)
            | AppError::Transfer(msg)
            | AppError::CompleteUpload(msg)
            | AppError::Publicize(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.message()
            }
        });

        (status, Json(body)).into_response()
    }
}
