//! folio - 联系人与项目作品集后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Contact Context: 联系人及其字段校验
//! - Project Context: 项目、图片上传策略
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, ImageStorage, TokenVerifier）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API、凭证校验与限流中间件
//! - Auth: HS256 JWT 校验
//! - Memory: 固定窗口限流器
//! - Persistence: SQLite 存储
//! - Adapters: 文件系统图片存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
