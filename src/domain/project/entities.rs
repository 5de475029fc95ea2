//! Project Context - Entities

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{is_present, FieldError};

/// 项目
///
/// 不变量:
/// - id 由存储分配，创建后不可变
/// - image 始终指向一次已完成的上传（`/uploads/<name>`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// 原样存储，不做日历校验
    pub date: String,
    #[schema(example = "/uploads/1700000000000-photo.png")]
    pub image: String,
}

/// 表单中的文本字段，全部可缺省
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// 通过校验、尚未关联图片的项目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub date: String,
}

impl ProjectDraft {
    pub fn parse(fields: ProjectFields) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = fields.name.unwrap_or_default();
        let description = fields.description.unwrap_or_default();
        let date = fields.date.unwrap_or_default();

        if !is_present(&name) {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if !is_present(&description) {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if !is_present(&date) {
            errors.push(FieldError::new("date", "Date is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name,
            description,
            date,
        })
    }
}

/// 局部更新：空白字段视为未提供，image 仅在有新上传时覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub image: Option<String>,
}

impl ProjectPatch {
    pub fn from_fields(fields: ProjectFields) -> Self {
        Self {
            name: fields.name.filter(|v| is_present(v)),
            description: fields.description.filter(|v| is_present(v)),
            date: fields.date.filter(|v| is_present(v)),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.image.is_none()
    }
}
