//! Project Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ProjectRepositoryPort;
use crate::application::queries::ListProjects;
use crate::domain::project::Project;

/// ListProjects Handler
pub struct ListProjectsHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ListProjectsHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, _query: ListProjects) -> Result<Vec<Project>, ApplicationError> {
        let projects = self.project_repo.find_all().await?;
        Ok(projects)
    }
}
