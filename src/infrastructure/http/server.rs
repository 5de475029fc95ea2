//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::error::ApiError;
use super::middleware::{error_logging_middleware, rate_limit_middleware};
use super::routes::create_routes;
use super::state::AppState;
use crate::config::{ServerConfig, UploadsConfig};

/// multipart 的边界和文本字段所需的额外空间
const FORM_OVERHEAD: usize = 1024 * 1024;

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    uploads: UploadsConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, uploads: UploadsConfig, state: AppState) -> Self {
        Self {
            config,
            uploads,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    ///
    /// 由外到内：Trace → CORS → CatchPanic → 错误日志 → 限流 → 路由
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(AnyOrigin)
            .max_age(Duration::from_secs(3600));

        // 单个文件的上限由上传策略按块检查，这里只兜住整个请求体
        let body_limit = usize::try_from(self.uploads.max_file_size)
            .unwrap_or(usize::MAX)
            .saturating_add(FORM_OVERHEAD);

        create_routes(self.state.clone(), &self.uploads)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await?;

        Ok(())
    }
}

/// handler 内部 panic 时返回通用 500
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::internal("Internal server error", detail).into_response()
}
