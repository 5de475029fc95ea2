//! Project Commands

use crate::domain::project::{ImageUpload, ProjectFields};

/// 新建项目命令（必须附带图片）
#[derive(Debug, Clone)]
pub struct AddProject {
    pub fields: ProjectFields,
    pub image: Option<ImageUpload>,
}

/// 局部更新项目命令，可选替换图片
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: i64,
    pub fields: ProjectFields,
    pub image: Option<ImageUpload>,
}

/// 删除项目命令
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: i64,
}
