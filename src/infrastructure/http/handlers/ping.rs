//! Ping Handler
//!
//! 健康检查，不需要凭证

use axum::Json;
use serde::Serialize;

use crate::infrastructure::http::error::ApiError;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 未匹配任何路由
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
