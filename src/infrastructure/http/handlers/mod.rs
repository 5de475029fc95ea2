//! HTTP Handlers

mod contact;
mod ping;
mod project;

pub use contact::*;
pub use ping::*;
pub use project::*;
