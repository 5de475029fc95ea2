//! Contact Context - 联系人限界上下文
//!
//! 职责:
//! - 联系人实体
//! - 新建 / 局部更新的字段校验

mod entities;

pub use entities::{Contact, ContactDraft, ContactInput, ContactPatch};
