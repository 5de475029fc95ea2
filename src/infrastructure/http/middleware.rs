//! HTTP Middleware
//!
//! - 失败响应日志
//! - 固定窗口限流
//! - 受保护路由的凭证校验

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Level;

use super::error::ApiError;
use super::state::AppState;
use crate::infrastructure::memory::{ClientKey, RateDecision};

/// 失败响应的日志级别
///
/// 5xx 为 ERROR；429 是限流的正常结果，只记 DEBUG；其余 4xx 为 WARN
pub(crate) fn failure_level(status: StatusCode) -> Option<Level> {
    if status.is_server_error() {
        Some(Level::ERROR)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        Some(Level::DEBUG)
    } else if status.is_client_error() {
        Some(Level::WARN)
    } else {
        None
    }
}

/// 失败响应日志中间件
///
/// 只记录路径（不含查询串）、状态码和耗时；500 的原因在 ApiError 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match failure_level(response.status()) {
        Some(Level::ERROR) => {
            tracing::error!(%method, %path, status, elapsed_ms, "Request failed")
        }
        Some(Level::WARN) => {
            tracing::warn!(%method, %path, status, elapsed_ms, "Request rejected")
        }
        Some(_) => {
            tracing::debug!(%method, %path, status, elapsed_ms, "Request throttled")
        }
        None => {}
    }

    response
}

/// 限流中间件，按对端 IP 计数；拿不到对端地址时共用一个窗口
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(request).await;
    };

    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| ClientKey::Ip(addr.ip()))
        .unwrap_or(ClientKey::Unknown);

    match limiter.check(&key) {
        RateDecision::Allowed { .. } => next.run(request).await,
        RateDecision::Limited { retry_after } => {
            tracing::debug!(client = ?key, "Rate limit exceeded");
            ApiError::TooManyRequests {
                retry_after: Some(retry_after),
            }
            .into_response()
        }
    }
}

/// 凭证校验中间件
///
/// 读取 `Authorization` 头（可带 `Bearer ` 前缀），任何失败都返回同一个 403，
/// 成功时把 AuthIdentity 放进请求扩展
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let identity = state.token_verifier.verify(credential).map_err(|e| {
        tracing::debug!(reason = %e, "Access denied");
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::RETRY_AFTER, Request as HttpRequest},
        routing::get,
        Router,
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    #[test]
    fn test_failure_level_by_status() {
        assert_eq!(failure_level(StatusCode::OK), None);
        assert_eq!(failure_level(StatusCode::CREATED), None);
        assert_eq!(failure_level(StatusCode::NOT_MODIFIED), None);
        assert_eq!(failure_level(StatusCode::BAD_REQUEST), Some(Level::WARN));
        assert_eq!(failure_level(StatusCode::FORBIDDEN), Some(Level::WARN));
        assert_eq!(failure_level(StatusCode::NOT_FOUND), Some(Level::WARN));
        assert_eq!(failure_level(StatusCode::TOO_MANY_REQUESTS), Some(Level::DEBUG));
        assert_eq!(
            failure_level(StatusCode::INTERNAL_SERVER_ERROR),
            Some(Level::ERROR)
        );
    }

    async fn missing_contact() -> ApiError {
        ApiError::NotFound("Contact not found".to_string())
    }

    async fn throttled() -> ApiError {
        ApiError::TooManyRequests {
            retry_after: Some(Duration::from_secs(30)),
        }
    }

    fn logged_router() -> Router {
        Router::new()
            .route("/contact/7", get(missing_contact))
            .route("/busy", get(throttled))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_logged_failure_keeps_error_body() {
        let request = HttpRequest::builder()
            .uri("/contact/7?token=secret")
            .body(Body::empty())
            .unwrap();

        let response = logged_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Contact not found"}"#);
    }

    #[tokio::test]
    async fn test_throttled_response_keeps_retry_after() {
        let request = HttpRequest::builder()
            .uri("/busy")
            .body(Body::empty())
            .unwrap();

        let response = logged_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[RETRY_AFTER], "30");
    }
}
