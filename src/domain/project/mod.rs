//! Project Context - 项目限界上下文
//!
//! 职责:
//! - 项目实体
//! - 新建字段校验、局部更新合并
//! - 图片上传策略（扩展名 / MIME / 大小）

mod entities;
mod upload;

pub use entities::{Project, ProjectDraft, ProjectFields, ProjectPatch};
pub use upload::{
    ImageKind, ImageUpload, UploadPolicy, UploadRejection, DEFAULT_MAX_FILE_SIZE, IMAGE_FIELD,
};
