//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 通用环境变量（`PORT`、`DATABASE_URL`、`SECRET_KEY`）
//! 2. 带前缀的环境变量（`FOLIO_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 部署环境中常见的无前缀变量
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub port: Option<String>,
    pub database_url: Option<String>,
    pub secret_key: Option<String>,
}

impl EnvOverrides {
    /// 从进程环境读取
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok(),
            database_url: std::env::var("DATABASE_URL").ok(),
            secret_key: std::env::var("SECRET_KEY").ok(),
        }
    }
}

/// 加载应用配置
///
/// # 环境变量示例
/// - `PORT=8080`
/// - `DATABASE_URL=sqlite:data/folio.db`
/// - `SECRET_KEY=change-me`
/// - `FOLIO_RATE_LIMIT__MAX_REQUESTS=500`
/// - `FOLIO_UPLOADS__DIR=/var/lib/folio/uploads`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(None, EnvOverrides::from_env())
}

/// 从指定路径和覆盖项加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
/// - `overrides` - 无前缀环境变量
pub fn load_config_from(
    config_path: Option<&Path>,
    overrides: EnvOverrides,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.max_connections", 5)?
        .set_default("auth.secret_key", "")?
        .set_default("uploads.dir", "uploads")?
        .set_default("uploads.url_prefix", "/uploads")?
        .set_default("uploads.max_file_size", 5 * 1024 * 1024)?
        .set_default("rate_limit.enabled", true)?
        .set_default("rate_limit.window_secs", 15 * 60)?
        .set_default("rate_limit.max_requests", 100)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量
    // 例如: FOLIO_DATABASE__URL=sqlite:data/folio.db
    builder = builder.add_source(
        Environment::with_prefix("FOLIO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 无前缀环境变量（最高优先级）
    builder = builder
        .set_override_option("server.port", overrides.port)?
        .set_override_option("database.url", overrides.database_url)?
        .set_override_option("auth.secret_key", overrides.secret_key)?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 数据库连接串必须提供
    match config.database.url.as_deref() {
        Some(url) if !url.trim().is_empty() => {}
        _ => {
            return Err(ConfigError::ValidationError(
                "Database URL is not defined (set DATABASE_URL)".to_string(),
            ))
        }
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max connections cannot be 0".to_string(),
        ));
    }

    if config.uploads.max_file_size == 0 {
        return Err(ConfigError::ValidationError(
            "Upload size limit cannot be 0".to_string(),
        ));
    }

    if !config.uploads.url_prefix.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "Upload URL prefix must start with '/'".to_string(),
        ));
    }

    if config.rate_limit.enabled
        && (config.rate_limit.window_secs == 0 || config.rate_limit.max_requests == 0)
    {
        return Err(ConfigError::ValidationError(
            "Rate limit window and max requests must be positive when enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "Database: {}",
        config.database.url.as_deref().unwrap_or("<unset>")
    );
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!(
        "Signing Secret: {}",
        if config.auth.secret_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        }
    );
    tracing::info!("Uploads Directory: {:?}", config.uploads.dir);
    tracing::info!("Uploads URL Prefix: {}", config.uploads.url_prefix);
    tracing::info!("Max Upload Size: {} bytes", config.uploads.max_file_size);
    tracing::info!("Rate Limit Enabled: {}", config.rate_limit.enabled);
    if config.rate_limit.enabled {
        tracing::info!(
            "Rate Limit: {} requests / {}s",
            config.rate_limit.max_requests,
            config.rate_limit.window_secs
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = Some("sqlite::memory:".to_string());
        config
    }

    fn overrides_with_db() -> EnvOverrides {
        EnvOverrides {
            database_url: Some("sqlite:data/test.db".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let config = AppConfig::default();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = valid_config();
        config.database.url = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_rate_limit() {
        let mut config = valid_config();
        config.rate_limit.max_requests = 0;
        assert!(validate_config(&config).is_err());

        config.rate_limit.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_relative_url_prefix() {
        let mut config = valid_config();
        config.uploads.url_prefix = "uploads".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_with_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 4000\n\n[rate_limit]\nmax_requests = 7\n\n[auth]\nsecret_key = \"from-file\""
        )
        .unwrap();

        let config = load_config_from(
            Some(file.path()),
            EnvOverrides {
                port: Some("5000".to_string()),
                ..overrides_with_db()
            },
        )
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.rate_limit.max_requests, 7);
        assert_eq!(config.auth.secret_key, "from-file");
        assert_eq!(config.database.url.as_deref(), Some("sqlite:data/test.db"));
        assert_eq!(config.uploads.max_file_size, 5 * 1024 * 1024);
    }

    #[test]
    fn test_load_without_database_url_fails() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let result = load_config_from(Some(file.path()), EnvOverrides::default());
        assert!(result.is_err());
    }
}
