//! Token Verifier Port - 无状态凭证校验
//!
//! (credential, secret) -> identity | failure，不保存任何会话状态

use thiserror::Error;

/// 凭证校验错误
///
/// 仅用于服务端日志，对调用方统一表现为 "Access denied"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Missing credential")]
    Missing,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Signing secret not configured")]
    SecretNotConfigured,
}

/// 校验通过后附加到请求上的身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    /// `sub` claim，缺省时为空串
    pub subject: String,
    /// `exp` claim（Unix 秒）
    pub expires_at: i64,
}

/// Token Verifier Port
pub trait TokenVerifierPort: Send + Sync {
    /// 校验签名与过期时间
    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError>;
}
