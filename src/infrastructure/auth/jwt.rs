//! JWT Verifier - HS256 对称签名校验
//!
//! 实现 TokenVerifierPort trait

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{AuthIdentity, TokenError, TokenVerifierPort};

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// JWT 校验器
///
/// 密钥为空时拒绝所有凭证
pub struct JwtVerifier {
    secret: Vec<u8>,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            secret: secret.as_ref().to_vec(),
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// 用同一密钥签发凭证（运维辅助命令与测试使用）
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        if !self.is_configured() {
            return Err(TokenError::SecretNotConfigured);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: now + ttl.as_secs() as i64,
            iat: Some(now),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

impl TokenVerifierPort for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        if !self.is_configured() {
            return Err(TokenError::SecretNotConfigured);
        }

        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })?;

        Ok(AuthIdentity {
            subject: data.claims.sub.unwrap_or_default(),
            expires_at: data.claims.exp,
        })
    }
}
