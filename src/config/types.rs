//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::project::DEFAULT_MAX_FILE_SIZE;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 鉴权配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 上传配置
    #[serde(default)]
    pub uploads: UploadsConfig,

    /// 限流配置
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 连接串，没有默认值，未设置时启动失败
    #[serde(default)]
    pub url: Option<String>,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

/// 鉴权配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// HS256 签名密钥，为空时所有受保护路由都拒绝访问
    #[serde(default)]
    pub secret_key: String,
}

/// 上传配置
#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// 上传文件存放目录
    #[serde(default = "default_uploads_dir")]
    pub dir: PathBuf,

    /// 静态访问路径前缀
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// 单个文件最大字节数，默认 5 MiB
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_url_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_uploads_dir(),
            url_prefix: default_url_prefix(),
            max_file_size: default_max_file_size(),
        }
    }
}

/// 限流配置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// 是否启用限流
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,

    /// 窗口长度（秒）
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// 每个窗口内每个客户端的最大请求数
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_window_secs() -> u64 {
    15 * 60
}

fn default_max_requests() -> u32 {
    100
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.database.url.is_none());
        assert_eq!(config.uploads.url_prefix, "/uploads");
        assert_eq!(config.uploads.max_file_size, 5 * 1024 * 1024);
        assert_eq!(config.rate_limit.window_secs, 900);
        assert_eq!(config.rate_limit.max_requests, 100);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_rate_limit_window() {
        let config = RateLimitConfig::default();
        assert_eq!(config.window(), Duration::from_secs(900));
    }
}
