//! Contact Commands

use crate::domain::contact::ContactInput;

/// 新建联系人命令
#[derive(Debug, Clone)]
pub struct AddContact {
    pub input: ContactInput,
}

/// 局部更新联系人命令
#[derive(Debug, Clone)]
pub struct UpdateContact {
    pub contact_id: i64,
    pub input: ContactInput,
}

/// 删除联系人命令
#[derive(Debug, Clone)]
pub struct DeleteContact {
    pub contact_id: i64,
}
