//! Project HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::application::{AddProject, AuthIdentity, DeleteProject, ListProjects, UpdateProject};
use crate::domain::project::Project;
use crate::infrastructure::http::dto::{
    ErrorResponse, MessageResponse, ProjectUploadForm, ValidationErrorResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{resource_id, ProjectForm};
use crate::infrastructure::http::state::AppState;

const RESOURCE: &str = "Project";

/// 新建项目（multipart，必须带图片）
#[utoipa::path(
    post,
    path = "/project",
    tag = "Projects",
    operation_id = "addProject",
    request_body(content = ProjectUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Missing image, invalid fields or rejected upload", body = ValidationErrorResponse),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 500, description = "Store or disk failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn add_project(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthIdentity>,
    form: ProjectForm,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    tracing::debug!(
        subject = %identity.subject,
        has_image = form.image.is_some(),
        "Create project requested"
    );

    let project = state
        .add_project_handler
        .handle(AddProject {
            fields: form.fields,
            image: form.image,
        })
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to create project"))?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// 列出全部项目
#[utoipa::path(
    get,
    path = "/project",
    tag = "Projects",
    operation_id = "listProjects",
    responses(
        (status = 200, description = "All projects, ascending id", body = [Project]),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .list_projects_handler
        .handle(ListProjects)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to fetch projects"))?;

    Ok(Json(projects))
}

/// 局部更新项目，可选替换图片
#[utoipa::path(
    put,
    path = "/project/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    params(("id" = i64, Path, description = "Project id")),
    request_body(content = ProjectUploadForm, content_type = "multipart/form-data",
        description = "Any subset of fields; `application/json` with `ProjectFields` is accepted when no image is sent"),
    responses(
        (status = 200, description = "Merged project", body = Project),
        (status = 400, description = "Rejected upload", body = ValidationErrorResponse),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Store or disk failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthIdentity>,
    Path(id): Path<String>,
    form: ProjectForm,
) -> Result<Json<Project>, ApiError> {
    let project_id = resource_id(&id, RESOURCE)?;
    tracing::debug!(subject = %identity.subject, project_id, "Update project requested");

    let project = state
        .update_project_handler
        .handle(UpdateProject {
            project_id,
            fields: form.fields,
            image: form.image,
        })
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to update project"))?;

    Ok(Json(project))
}

/// 删除项目，图片文件保留
#[utoipa::path(
    delete,
    path = "/project/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted, image file kept", body = MessageResponse),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthIdentity>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let project_id = resource_id(&id, RESOURCE)?;
    tracing::debug!(subject = %identity.subject, project_id, "Delete project requested");

    state
        .delete_project_handler
        .handle(DeleteProject { project_id })
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to delete project"))?;

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
