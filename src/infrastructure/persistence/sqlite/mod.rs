//! SQLite Persistence - SQLite 数据库持久化实现

mod contact_repo;
mod database;
mod project_repo;

pub use contact_repo::*;
pub use database::*;
pub use project_repo::*;
