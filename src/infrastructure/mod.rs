//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod auth;
pub mod http;
pub mod memory;
pub mod persistence;

pub use adapters::FileImageStorage;
pub use auth::JwtVerifier;
pub use memory::FixedWindowRateLimiter;
pub use persistence::{SqliteContactRepository, SqliteProjectRepository};
