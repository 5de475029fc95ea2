//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod image_storage;
mod repositories;
mod token_verifier;

pub use image_storage::{ImageStorageError, ImageStoragePort, StoredImage};
pub use repositories::{ContactRepositoryPort, ProjectRepositoryPort, RepositoryError};
pub use token_verifier::{AuthIdentity, TokenError, TokenVerifierPort};
