//! 字段校验 - 两个上下文共享的校验规则

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

/// 单个字段的校验失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(value_type = String, example = "email")]
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// local@domain.tld，域名最后一段至少两个字母
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email regex is valid")
});

/// 可选的 `+`，之后 10-15 位数字，数字组之间允许单个空格或连字符
static MOBILE_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d+(?:[ -]\d+)*$").expect("phone regex is valid"));

/// 非空文本（trim 之后）
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    let local_len = value.split('@').next().map(str::len).unwrap_or(0);
    value.len() <= 254 && local_len <= 64 && EMAIL_RE.is_match(value)
}

pub fn is_valid_mobile_phone(value: &str) -> bool {
    if !MOBILE_PHONE_RE.is_match(value) {
        return false;
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (10..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spa ce@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_mobile_phone_syntax() {
        assert!(is_valid_mobile_phone("1234567890"));
        assert!(is_valid_mobile_phone("+447700900123"));
        assert!(is_valid_mobile_phone("+44 7700 900123"));
        assert!(is_valid_mobile_phone("555-123-4567"));
        assert!(!is_valid_mobile_phone("12345"));
        assert!(!is_valid_mobile_phone("1234567890123456"));
        assert!(!is_valid_mobile_phone("phone"));
        assert!(!is_valid_mobile_phone("123--4567890"));
        assert!(!is_valid_mobile_phone(""));
    }

    #[test]
    fn test_is_present() {
        assert!(is_present("x"));
        assert!(!is_present("   "));
    }
}
