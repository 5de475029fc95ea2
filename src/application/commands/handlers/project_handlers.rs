//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::{AddProject, DeleteProject, UpdateProject};
use crate::application::error::ApplicationError;
use crate::application::ports::{ImageStoragePort, ProjectRepositoryPort};
use crate::domain::project::{Project, ProjectDraft, ProjectPatch, IMAGE_FIELD};

// ============================================================================
// AddProject
// ============================================================================

/// AddProject Handler
///
/// 图片缺失时在任何写操作之前失败；字段校验通过后才把图片落盘
pub struct AddProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
    image_storage: Arc<dyn ImageStoragePort>,
}

impl AddProjectHandler {
    pub fn new(
        project_repo: Arc<dyn ProjectRepositoryPort>,
        image_storage: Arc<dyn ImageStoragePort>,
    ) -> Self {
        Self {
            project_repo,
            image_storage,
        }
    }

    pub async fn handle(&self, command: AddProject) -> Result<Project, ApplicationError> {
        let upload = command
            .image
            .ok_or_else(|| ApplicationError::invalid_field(IMAGE_FIELD, "Image is required"))?;

        let draft = ProjectDraft::parse(command.fields).map_err(ApplicationError::validation)?;

        let stored = self.image_storage.store(&upload).await?;
        let project = self.project_repo.insert(&draft, &stored.public_path).await?;

        tracing::info!(
            project_id = project.id,
            image = %project.image,
            "Project created"
        );

        Ok(project)
    }
}

// ============================================================================
// UpdateProject
// ============================================================================

/// UpdateProject Handler
///
/// 非图片字段不做校验；新图片覆盖路径，旧文件保留
pub struct UpdateProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
    image_storage: Arc<dyn ImageStoragePort>,
}

impl UpdateProjectHandler {
    pub fn new(
        project_repo: Arc<dyn ProjectRepositoryPort>,
        image_storage: Arc<dyn ImageStoragePort>,
    ) -> Self {
        Self {
            project_repo,
            image_storage,
        }
    }

    pub async fn handle(&self, command: UpdateProject) -> Result<Project, ApplicationError> {
        let project_id = command.project_id;

        // 先确认存在，避免为不存在的项目写文件
        self.project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;

        let mut patch = ProjectPatch::from_fields(command.fields);
        if let Some(upload) = &command.image {
            let stored = self.image_storage.store(upload).await?;
            patch = patch.with_image(stored.public_path);
        }

        let project = self
            .project_repo
            .update(project_id, &patch)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;

        tracing::info!(
            project_id = project_id,
            image_replaced = patch.image.is_some(),
            "Project updated"
        );

        Ok(project)
    }
}

// ============================================================================
// DeleteProject
// ============================================================================

/// DeleteProject Handler
pub struct DeleteProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl DeleteProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, command: DeleteProject) -> Result<Project, ApplicationError> {
        let project_id = command.project_id;

        let project = self
            .project_repo
            .delete(project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;

        tracing::info!(project_id = project_id, name = %project.name, "Project deleted");

        Ok(project)
    }
}
