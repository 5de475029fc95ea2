//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、ImageStorage、TokenVerifier）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Contact commands
    AddContact,
    DeleteContact,
    UpdateContact,
    // Project commands
    AddProject,
    DeleteProject,
    UpdateProject,
    // Handlers
    handlers::{
        AddContactHandler, AddProjectHandler, DeleteContactHandler, DeleteProjectHandler,
        UpdateContactHandler, UpdateProjectHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Auth
    AuthIdentity,
    TokenError,
    TokenVerifierPort,
    // Image storage
    ImageStorageError,
    ImageStoragePort,
    StoredImage,
    // Repositories
    ContactRepositoryPort,
    ProjectRepositoryPort,
    RepositoryError,
};

pub use queries::{
    ListContacts,
    ListProjects,
    // Handlers
    handlers::{ListContactsHandler, ListProjectsHandler},
};
