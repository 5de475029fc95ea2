//! Project Context - 图片上传策略
//!
//! 扩展名与声明的 MIME 类型都必须落在 {jpeg, jpg, png, gif} 内，
//! 并且文件大小不超过上限。

use std::path::Path;

use thiserror::Error;

use crate::domain::validation::FieldError;

/// 上传文件所在的表单字段名
pub const IMAGE_FIELD: &str = "image";

/// 默认上限 5 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// 允许的图片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// 按扩展名或 MIME 子类型识别（大小写不敏感）
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// 上传被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Only image files are allowed")]
    NotAnImage,

    #[error("File too large (limit {limit} bytes)")]
    TooLarge { limit: u64 },

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Malformed upload: {0}")]
    Malformed(String),
}

impl UploadRejection {
    pub fn to_field_error(&self) -> FieldError {
        let field = match self {
            UploadRejection::Malformed(_) => "body",
            _ => IMAGE_FIELD,
        };
        FieldError::new(field, self.to_string())
    }
}

/// 已通过类型和大小检查、尚未落盘的图片
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

/// 上传策略
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl UploadPolicy {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// 扩展名和 MIME 两项检查都必须通过
    pub fn check_type(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<ImageKind, UploadRejection> {
        let ext_kind = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .and_then(ImageKind::from_token);

        let mime_kind = content_type
            .and_then(|mime| mime.split(';').next())
            .map(str::trim)
            .and_then(|mime| {
                let (top, sub) = mime.split_once('/')?;
                if top.eq_ignore_ascii_case("image") {
                    ImageKind::from_token(sub)
                } else {
                    None
                }
            });

        match (ext_kind, mime_kind) {
            (Some(kind), Some(_)) => Ok(kind),
            _ => Err(UploadRejection::NotAnImage),
        }
    }

    /// 流式读取时对累计字节数做检查
    pub fn check_size(&self, received: u64) -> Result<(), UploadRejection> {
        if received > self.max_file_size {
            return Err(UploadRejection::TooLarge {
                limit: self.max_file_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_image() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.check_type(Some("photo.png"), Some("image/png")),
            Ok(ImageKind::Png)
        );
        assert_eq!(
            policy.check_type(Some("PHOTO.JPG"), Some("image/jpeg")),
            Ok(ImageKind::Jpeg)
        );
    }

    #[test]
    fn test_rejects_exe_even_with_image_mime() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.check_type(Some("photo.exe"), Some("image/png")),
            Err(UploadRejection::NotAnImage)
        );
    }

    #[test]
    fn test_rejects_image_name_with_wrong_mime() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.check_type(Some("photo.png"), Some("application/octet-stream")),
            Err(UploadRejection::NotAnImage)
        );
        assert_eq!(
            policy.check_type(Some("photo.png"), None),
            Err(UploadRejection::NotAnImage)
        );
        assert_eq!(
            policy.check_type(None, Some("image/png")),
            Err(UploadRejection::NotAnImage)
        );
    }

    #[test]
    fn test_size_limit() {
        let policy = UploadPolicy::new(10);
        assert!(policy.check_size(10).is_ok());
        assert_eq!(
            policy.check_size(11),
            Err(UploadRejection::TooLarge { limit: 10 })
        );
    }

    #[test]
    fn test_default_limit_is_five_mib() {
        assert_eq!(UploadPolicy::default().max_file_size(), 5_242_880);
    }

    #[test]
    fn test_rejection_maps_to_image_field() {
        let err = UploadRejection::NotAnImage.to_field_error();
        assert_eq!(err.field, "image");
        assert_eq!(err.message, "Only image files are allowed");
    }
}
