//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod contact_commands;
mod project_commands;

pub mod handlers;

pub use contact_commands::*;
pub use project_commands::*;
