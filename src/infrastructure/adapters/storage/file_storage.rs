//! File Storage - 文件系统图片存储实现
//!
//! 实现 ImageStoragePort trait

use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{ImageStorageError, ImageStoragePort, StoredImage};
use crate::domain::project::ImageUpload;

/// 同一毫秒内同名文件冲突时的最大重试次数
const MAX_NAME_ATTEMPTS: i64 = 8;

/// 文件系统图片存储
pub struct FileImageStorage {
    /// 存储根目录
    base_dir: PathBuf,
    /// 对外访问路径前缀，如 `/uploads`
    url_prefix: String,
}

impl FileImageStorage {
    /// 创建新的文件存储
    pub async fn new(
        base_dir: impl AsRef<Path>,
        url_prefix: impl Into<String>,
    ) -> Result<Self, ImageStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir).await?;

        Ok(Self {
            base_dir,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }
}

/// 只保留原始文件名的最后一段，并替换掉 `[A-Za-z0-9._-]` 以外的字符
pub fn sanitize_file_name(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// 写入并落盘；失败时删除已创建的文件，不留半截图片
async fn write_or_discard(
    mut file: fs::File,
    disk_path: &Path,
    bytes: &[u8],
) -> std::io::Result<()> {
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(remove_err) = fs::remove_file(disk_path).await {
            tracing::warn!(
                path = %disk_path.display(),
                error = %remove_err,
                "Failed to remove partial upload"
            );
        }
        return Err(e);
    }

    Ok(())
}

#[async_trait]
impl ImageStoragePort for FileImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<StoredImage, ImageStorageError> {
        let original = sanitize_file_name(&upload.original_name);
        let stamp = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = format!("{}-{}", stamp + attempt, original);
            let disk_path = self.base_dir.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&disk_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            write_or_discard(file, &disk_path, &upload.bytes).await?;

            tracing::debug!(
                "Saved image: file={}, type={}, size={} bytes",
                file_name,
                upload.kind.mime(),
                upload.bytes.len()
            );

            return Ok(StoredImage {
                public_path: self.public_path(&file_name),
                file_name,
                disk_path,
            });
        }

        Err(ImageStorageError::IoError(format!(
            "could not allocate a unique name for {}",
            original
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ImageKind;
    use tempfile::tempdir;

    fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            original_name: name.to_string(),
            kind: ImageKind::Png,
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_store_writes_timestamped_file() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path(), "/uploads/").await.unwrap();

        let stored = storage.store(&upload("photo.png", b"fake png")).await.unwrap();

        assert!(stored.file_name.ends_with("-photo.png"));
        let stamp = stored.file_name.trim_end_matches("-photo.png");
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(stored.public_path, format!("/uploads/{}", stored.file_name));
        assert_eq!(stored.disk_path, storage.base_dir().join(&stored.file_name));
        assert_eq!(std::fs::read(&stored.disk_path).unwrap(), b"fake png");
    }

    #[tokio::test]
    async fn test_same_name_never_overwrites() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path(), "/uploads").await.unwrap();

        let first = storage.store(&upload("a.png", b"one")).await.unwrap();
        let second = storage.store(&upload("a.png", b"two")).await.unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert_eq!(std::fs::read(&first.disk_path).unwrap(), b"one");
        assert_eq!(std::fs::read(&second.disk_path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("public").join("uploads");
        FileImageStorage::new(&nested, "/uploads").await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("1700000000000-photo.png");
        fs::write(&path, b"").await.unwrap();

        // 只读句柄上的写入必然失败
        let read_only = fs::File::open(&path).await.unwrap();
        let result = write_or_discard(read_only, &path, b"\x89PNG image bytes").await;

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_file_name("C:\\pics\\my pic.png"), "my_pic.png");
        assert_eq!(sanitize_file_name(".hidden.gif"), "hidden.gif");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
