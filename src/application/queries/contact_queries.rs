//! Contact Queries

/// 列出所有联系人查询
#[derive(Debug, Clone)]
pub struct ListContacts;
