//! Project Queries

/// 列出所有项目查询
#[derive(Debug, Clone)]
pub struct ListProjects;
