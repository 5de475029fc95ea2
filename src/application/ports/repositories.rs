//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::contact::{Contact, ContactDraft, ContactPatch};
use crate::domain::project::{Project, ProjectDraft, ProjectPatch};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ============================================================================
// Contact Repository
// ============================================================================

/// Contact Repository Port
///
/// `update` / `delete` 在 id 不存在时返回 `Ok(None)`
#[async_trait]
pub trait ContactRepositoryPort: Send + Sync {
    /// 插入联系人，由存储分配 id
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, RepositoryError>;

    /// 获取所有联系人（按 id 升序）
    async fn find_all(&self) -> Result<Vec<Contact>, RepositoryError>;

    /// 根据 ID 查找联系人
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, RepositoryError>;

    /// 局部更新，返回更新后的记录
    async fn update(
        &self,
        id: i64,
        patch: &ContactPatch,
    ) -> Result<Option<Contact>, RepositoryError>;

    /// 删除联系人，返回被删除的记录
    async fn delete(&self, id: i64) -> Result<Option<Contact>, RepositoryError>;
}

// ============================================================================
// Project Repository
// ============================================================================

/// Project Repository Port
#[async_trait]
pub trait ProjectRepositoryPort: Send + Sync {
    /// 插入项目，image 为已落盘图片的访问路径
    async fn insert(&self, draft: &ProjectDraft, image: &str) -> Result<Project, RepositoryError>;

    /// 获取所有项目（按 id 升序）
    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError>;

    /// 根据 ID 查找项目
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, RepositoryError>;

    /// 局部更新，返回更新后的记录
    async fn update(
        &self,
        id: i64,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, RepositoryError>;

    /// 删除项目，返回被删除的记录（图片文件保留）
    async fn delete(&self, id: i64) -> Result<Option<Project>, RepositoryError>;
}
