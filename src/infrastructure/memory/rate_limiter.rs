//! In-Memory Fixed-Window Rate Limiter
//!
//! 每个客户端地址在一个固定窗口内最多放行 `max_requests` 个请求

use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 限流配置
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_requests: 100,
        }
    }
}

/// 单个客户端的窗口状态
#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// 限流客户端标识
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientKey {
    Ip(IpAddr),
    /// 拿不到对端地址时所有请求共用一个窗口
    Unknown,
}

/// 判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// 固定窗口限流器
pub struct FixedWindowRateLimiter {
    settings: RateLimitSettings,
    windows: DashMap<ClientKey, Window>,
}

impl FixedWindowRateLimiter {
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            settings,
            windows: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn settings(&self) -> &RateLimitSettings {
        &self.settings
    }

    /// 记录一次请求并给出判定
    pub fn check(&self, key: &ClientKey) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &ClientKey, now: Instant) -> RateDecision {
        let mut entry = self.windows.entry(key.clone()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started_at);
        if elapsed >= self.settings.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.settings.max_requests {
            let retry_after = self
                .settings
                .window
                .saturating_sub(now.saturating_duration_since(entry.started_at));
            return RateDecision::Limited { retry_after };
        }

        entry.count += 1;
        RateDecision::Allowed {
            remaining: self.settings.max_requests - entry.count,
        }
    }

    /// 清理已过期的窗口，返回清理数量
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        let window = self.settings.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started_at) < window);
        let purged = before.saturating_sub(self.windows.len());
        if purged > 0 {
            tracing::debug!(purged = purged, "Expired rate-limit windows purged");
        }
        purged
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
