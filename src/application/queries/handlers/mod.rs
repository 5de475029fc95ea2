//! Query Handlers 实现

mod contact_handlers;
mod project_handlers;

pub use contact_handlers::*;
pub use project_handlers::*;
