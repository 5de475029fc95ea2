//! Auth - 无状态 JWT 凭证校验

mod jwt;

pub use jwt::{Claims, JwtVerifier};
