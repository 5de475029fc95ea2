//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::domain::FieldError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 字段校验失败，在任何写操作之前返回
    #[error("Validation failed: {}", join_fields(.0))]
    ValidationError(Vec<FieldError>),

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationError(errors)
    }

    /// 单字段验证错误
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationError(vec![FieldError::new(field, message)])
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<crate::application::ports::ImageStorageError> for ApplicationError {
    fn from(err: crate::application::ports::ImageStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = ApplicationError::validation(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("email", "Invalid email format"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: Name is required, email: Invalid email format"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ApplicationError::not_found("Contact", 42);
        assert_eq!(err.to_string(), "Contact not found: 42");
    }
}
