//! Image Storage Port - 上传图片持久化
//!
//! 具体实现在 infrastructure/adapters/storage 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::project::ImageUpload;

/// 图片存储错误
#[derive(Debug, Error)]
pub enum ImageStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ImageStorageError {
    fn from(e: std::io::Error) -> Self {
        ImageStorageError::IoError(e.to_string())
    }
}

/// 已落盘的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// 生成的文件名 `<unix-millis>-<original-name>`
    pub file_name: String,
    /// 磁盘上的完整路径
    pub disk_path: PathBuf,
    /// 对外访问路径 `/uploads/<file_name>`
    pub public_path: String,
}

/// Image Storage Port
///
/// 只写不删：记录删除或图片替换时旧文件保留
#[async_trait]
pub trait ImageStoragePort: Send + Sync {
    /// 保存图片并返回访问路径
    async fn store(&self, upload: &ImageUpload) -> Result<StoredImage, ImageStorageError>;
}
