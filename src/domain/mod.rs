//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Contact Context: 联系人管理
//! - Project Context: 项目管理（含图片上传策略）

pub mod contact;
pub mod project;

// 共享的字段校验规则
mod validation;

pub use validation::{is_present, is_valid_email, is_valid_mobile_phone, FieldError};
