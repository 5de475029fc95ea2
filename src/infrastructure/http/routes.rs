//! HTTP Routes
//!
//! API Endpoints:
//! - /ping            GET     健康检查（公开）
//! - /contact         POST    新建联系人（公开）
//! - /contact         GET     列出联系人
//! - /contact/:id     PUT     更新联系人
//! - /contact/:id     DELETE  删除联系人
//! - /project         POST    新建项目（multipart，含图片）
//! - /project         GET     列出项目
//! - /project/:id     PUT     更新项目
//! - /project/:id     DELETE  删除项目
//! - /uploads/*       GET     已上传图片（公开，静态文件）
//! - /api-docs        GET     Swagger UI（公开）
//! - /openapi.json    GET     OpenAPI 文档（公开）

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::middleware::require_auth;
use super::openapi::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use super::state::AppState;
use crate::config::UploadsConfig;

/// 创建所有路由
///
/// `/contact` 上 POST 公开、GET 受保护，所以凭证校验挂在各自的方法路由上
pub fn create_routes(state: Arc<AppState>, uploads: &UploadsConfig) -> Router<Arc<AppState>> {
    let auth = middleware::from_fn_with_state(state, require_auth);

    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/contact",
            post(handlers::add_contact)
                .merge(get(handlers::list_contacts).route_layer(auth.clone())),
        )
        .route(
            "/contact/:id",
            put(handlers::update_contact)
                .delete(handlers::delete_contact)
                .route_layer(auth.clone()),
        )
        .route(
            "/project",
            get(handlers::list_projects)
                .post(handlers::add_project)
                .route_layer(auth.clone()),
        )
        .route(
            "/project/:id",
            put(handlers::update_project)
                .delete(handlers::delete_project)
                .route_layer(auth),
        )
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .nest_service(&uploads.url_prefix, ServeDir::new(&uploads.dir))
        .fallback(handlers::not_found)
}
