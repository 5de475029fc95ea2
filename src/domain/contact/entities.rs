//! Contact Context - Entities

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{is_present, is_valid_email, is_valid_mobile_phone, FieldError};

/// 联系人
///
/// 不变量:
/// - id 由存储分配，创建后不可变
/// - 存储中的 email / phone 均满足格式校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "+44 7700 900123")]
    pub phone: String,
    pub description: String,
}

/// 请求体中的原始字段，全部可缺省
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

/// 通过校验、待插入的联系人
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
}

impl ContactDraft {
    /// 校验全部字段，返回所有失败项
    pub fn parse(input: ContactInput) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = input.name.unwrap_or_default();
        let email = input.email.unwrap_or_default();
        let phone = input.phone.unwrap_or_default();
        let description = input.description.unwrap_or_default();

        check_name(&name, &mut errors);
        check_email(&email, &mut errors);
        check_phone(&phone, &mut errors);
        check_description(&description, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name,
            email,
            phone,
            description,
        })
    }
}

/// 局部更新：只有 `Some` 字段会覆盖已存储的值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

impl ContactPatch {
    /// 仅校验提供了的字段
    pub fn parse(input: ContactInput) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(name) = &input.name {
            check_name(name, &mut errors);
        }
        if let Some(email) = &input.email {
            check_email(email, &mut errors);
        }
        if let Some(phone) = &input.phone {
            check_phone(phone, &mut errors);
        }
        if let Some(description) = &input.description {
            check_description(description, &mut errors);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
            description: input.description,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.description.is_none()
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if !is_present(name) {
        errors.push(FieldError::new("name", "Name is required"));
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
}

fn check_phone(phone: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_mobile_phone(phone) {
        errors.push(FieldError::new("phone", "Invalid phone number"));
    }
}

fn check_description(description: &str, errors: &mut Vec<FieldError>) {
    if !is_present(description) {
        errors.push(FieldError::new("description", "Description is required"));
    }
}
