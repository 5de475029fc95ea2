//! Data Transfer Objects
//!
//! 记录本身（Contact / Project）直接序列化返回，这里只放外层响应体

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FieldError;

/// `{"message": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"error": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `{"errors": [{"field": "...", "message": "..."}]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// 项目表单（multipart/form-data），仅用于接口文档
#[derive(ToSchema)]
pub struct ProjectUploadForm {
    pub name: String,
    pub description: String,
    #[schema(example = "2024-01-15")]
    pub date: String,
    /// jpeg / jpg / png / gif，最大 5 MiB
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
