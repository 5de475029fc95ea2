//! folio - 联系人与项目作品集后端
//!
//! - `folio` / `folio serve`: 启动 HTTP 服务
//! - `folio issue-token`: 用配置的密钥签发访问凭证（运维辅助）

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use folio::config::{load_config, print_config, AppConfig};
use folio::domain::project::UploadPolicy;
use folio::infrastructure::auth::JwtVerifier;
use folio::infrastructure::http::{AppState, HttpServer};
use folio::infrastructure::memory::{FixedWindowRateLimiter, RateLimitSettings};
use folio::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteContactRepository,
    SqliteProjectRepository,
};
use folio::infrastructure::FileImageStorage;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Contacts and projects REST backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the HTTP server (default)")]
    Serve,

    #[command(about = "Print a signed access token for the configured secret")]
    IssueToken {
        #[arg(long, help = "Value of the `sub` claim")]
        subject: String,

        #[arg(long, default_value_t = 3600, help = "Token lifetime in seconds")]
        ttl_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env 中的变量先进入进程环境，再参与配置合并
    let _ = dotenvy::dotenv();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::IssueToken { subject, ttl_secs } => {
            let token = JwtVerifier::new(&config.auth.secret_key)
                .issue(&subject, Duration::from_secs(ttl_secs))
                .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;
            println!("{}", token);
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},folio={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    init_tracing(&config);

    tracing::info!("folio - contacts & projects backend");
    print_config(&config);

    if config.auth.secret_key.is_empty() {
        tracing::warn!("SECRET_KEY is empty, every protected request will be denied");
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(
        config.database.url.clone().unwrap_or_default(),
        config.database.max_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    tracing::info!("Database connected");

    // 创建 Repository 适配器
    let contact_repo = Arc::new(SqliteContactRepository::new(pool.clone()));
    let project_repo = Arc::new(SqliteProjectRepository::new(pool));

    // 上传目录（不存在时创建）
    let image_storage = Arc::new(
        FileImageStorage::new(&config.uploads.dir, &config.uploads.url_prefix).await?,
    );

    let token_verifier = Arc::new(JwtVerifier::new(&config.auth.secret_key));

    // 限流窗口按窗口长度周期清理
    let rate_limiter = config.rate_limit.enabled.then(|| {
        FixedWindowRateLimiter::new(RateLimitSettings {
            window: config.rate_limit.window(),
            max_requests: config.rate_limit.max_requests,
        })
        .arc()
    });
    if let Some(limiter) = rate_limiter.clone() {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(limiter.settings().window);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                limiter.purge_expired();
            }
        });
    }

    let state = AppState::new(
        contact_repo,
        project_repo,
        image_storage,
        token_verifier,
        UploadPolicy::new(config.uploads.max_file_size),
        rate_limiter,
    );

    let server = HttpServer::new(config.server.clone(), config.uploads.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
