//! Application State
//!
//! 所有 Command/Query Handlers 以及中间件依赖的组件

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddContactHandler, AddProjectHandler, DeleteContactHandler, DeleteProjectHandler,
    UpdateContactHandler, UpdateProjectHandler,
    // Query handlers
    ListContactsHandler, ListProjectsHandler,
    // Ports
    ContactRepositoryPort, ImageStoragePort, ProjectRepositoryPort, TokenVerifierPort,
};
use crate::domain::project::UploadPolicy;
use crate::infrastructure::memory::FixedWindowRateLimiter;

/// 应用状态
pub struct AppState {
    // ========== Request pipeline ==========
    pub token_verifier: Arc<dyn TokenVerifierPort>,
    /// None 表示关闭限流
    pub rate_limiter: Option<Arc<FixedWindowRateLimiter>>,
    pub upload_policy: UploadPolicy,

    // ========== Command Handlers ==========
    pub add_contact_handler: AddContactHandler,
    pub update_contact_handler: UpdateContactHandler,
    pub delete_contact_handler: DeleteContactHandler,
    pub add_project_handler: AddProjectHandler,
    pub update_project_handler: UpdateProjectHandler,
    pub delete_project_handler: DeleteProjectHandler,

    // ========== Query Handlers ==========
    pub list_contacts_handler: ListContactsHandler,
    pub list_projects_handler: ListProjectsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        contact_repo: Arc<dyn ContactRepositoryPort>,
        project_repo: Arc<dyn ProjectRepositoryPort>,
        image_storage: Arc<dyn ImageStoragePort>,
        token_verifier: Arc<dyn TokenVerifierPort>,
        upload_policy: UploadPolicy,
        rate_limiter: Option<Arc<FixedWindowRateLimiter>>,
    ) -> Self {
        Self {
            // Command handlers
            add_contact_handler: AddContactHandler::new(contact_repo.clone()),
            update_contact_handler: UpdateContactHandler::new(contact_repo.clone()),
            delete_contact_handler: DeleteContactHandler::new(contact_repo.clone()),
            add_project_handler: AddProjectHandler::new(
                project_repo.clone(),
                image_storage.clone(),
            ),
            update_project_handler: UpdateProjectHandler::new(
                project_repo.clone(),
                image_storage,
            ),
            delete_project_handler: DeleteProjectHandler::new(project_repo.clone()),

            // Query handlers
            list_contacts_handler: ListContactsHandler::new(contact_repo),
            list_projects_handler: ListProjectsHandler::new(project_repo),

            token_verifier,
            rate_limiter,
            upload_policy,
        }
    }
}
