//! HTTP Error Handling
//!
//! ApiError 到状态码与响应体的唯一映射点

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ErrorResponse, MessageResponse, ValidationErrorResponse};
use crate::application::ApplicationError;
use crate::domain::project::UploadRejection;
use crate::domain::FieldError;

/// 鉴权失败时的统一提示，不区分失败原因
pub const ACCESS_DENIED: &str = "Access denied";

/// 限流时的纯文本响应体
pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later.";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400，列出每个未通过的字段
    ValidationFailed(Vec<FieldError>),
    /// 403
    Unauthorized,
    /// 404，消息直接作为 `error` 返回
    NotFound(String),
    /// 500，`message` 返回给调用方，`cause` 只写日志
    Internal { message: String, cause: String },
    /// 429
    TooManyRequests { retry_after: Option<Duration> },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, cause: impl ToString) -> Self {
        ApiError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    /// 请求体无法解析
    pub fn malformed_body(detail: impl Into<String>) -> Self {
        ApiError::ValidationFailed(vec![FieldError::new("body", detail)])
    }

    /// 把用例错误翻译为 HTTP 错误
    ///
    /// `failure` 是存储失败时返回给调用方的通用描述，如 `Failed to update contact`
    pub fn from_application(err: ApplicationError, failure: &str) -> Self {
        match err {
            ApplicationError::ValidationError(errors) => ApiError::ValidationFailed(errors),
            ApplicationError::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found", resource_type))
            }
            ApplicationError::RepositoryError(cause) | ApplicationError::StorageError(cause) => {
                ApiError::internal(failure, cause)
            }
        }
    }
}

impl From<UploadRejection> for ApiError {
    fn from(rejection: UploadRejection) -> Self {
        ApiError::ValidationFailed(vec![rejection.to_field_error()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ValidationFailed(errors) => {
                tracing::debug!(errors = errors.len(), "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response()
            }
            ApiError::Unauthorized => (
                StatusCode::FORBIDDEN,
                Json(MessageResponse::new(ACCESS_DENIED)),
            )
                .into_response(),
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::Internal { message, cause } => {
                tracing::error!(error = %cause, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(message)),
                )
                    .into_response()
            }
            ApiError::TooManyRequests { retry_after } => {
                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS).into_response();
                if let Some(retry_after) = retry_after {
                    let secs = retry_after.as_secs().max(1);
                    if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                        response.headers_mut().insert(header::RETRY_AFTER, value);
                    }
                }
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let response = ApiError::ValidationFailed(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("email", "Invalid email format"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"errors": [
                {"field": "name", "message": "Name is required"},
                {"field": "email", "message": "Invalid email format"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let err = ApiError::from_application(
            ApplicationError::RepositoryError("disk I/O error".to_string()),
            "Failed to create contact",
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Failed to create contact"})
        );
    }

    #[tokio::test]
    async fn test_not_found_uses_resource_name() {
        let err = ApiError::from_application(
            ApplicationError::not_found("Project", 9),
            "Failed to update project",
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Project not found"})
        );
    }

    #[tokio::test]
    async fn test_too_many_requests_is_plain_text() {
        let response = ApiError::TooManyRequests {
            retry_after: Some(Duration::from_secs(30)),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "30");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], TOO_MANY_REQUESTS.as_bytes());
    }

    #[test]
    fn test_upload_rejection_maps_to_image_field() {
        match ApiError::from(UploadRejection::NotAnImage) {
            ApiError::ValidationFailed(errors) => {
                assert_eq!(errors[0].field, "image");
                assert_eq!(errors[0].message, "Only image files are allowed");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
