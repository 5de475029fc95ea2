//! In-Memory Implementations
//!
//! 进程内状态：仅限流窗口

mod rate_limiter;

pub use rate_limiter::{ClientKey, FixedWindowRateLimiter, RateDecision, RateLimitSettings};
