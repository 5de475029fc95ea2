//! OpenAPI 文档
//!
//! 由 handlers 上的 `#[utoipa::path]` 生成，Swagger UI 挂在 `/api-docs`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{
    ErrorResponse, MessageResponse, ProjectUploadForm, ValidationErrorResponse,
};
use super::handlers;
use crate::domain::contact::{Contact, ContactInput};
use crate::domain::project::{Project, ProjectFields};
use crate::domain::FieldError;

/// Swagger UI 路径
pub const SWAGGER_UI_PATH: &str = "/api-docs";

/// OpenAPI JSON 路径
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "folio",
        description = "Contacts and projects REST backend"
    ),
    paths(
        handlers::add_contact,
        handlers::list_contacts,
        handlers::update_contact,
        handlers::delete_contact,
        handlers::add_project,
        handlers::list_projects,
        handlers::update_project,
        handlers::delete_project,
    ),
    components(
        schemas(
            Contact,
            ContactInput,
            Project,
            ProjectFields,
            ProjectUploadForm,
            FieldError,
            MessageResponse,
            ErrorResponse,
            ValidationErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Contacts", description = "Contact form submissions"),
        (name = "Projects", description = "Portfolio projects with an image")
    )
)]
pub struct ApiDoc;

/// `Authorization` 头携带的 HS256 JWT，`Bearer ` 前缀可省略
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_crud_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        let mut operations = Vec::new();
        for (path, item) in paths {
            for method in ["get", "post", "put", "delete"] {
                if item.get(method).is_some() {
                    operations.push(format!("{} {}", method.to_uppercase(), path));
                }
            }
        }
        operations.sort();

        assert_eq!(
            operations,
            [
                "DELETE /contact/{id}",
                "DELETE /project/{id}",
                "GET /contact",
                "GET /project",
                "POST /contact",
                "POST /project",
                "PUT /contact/{id}",
                "PUT /project/{id}",
            ]
        );
    }

    #[test]
    fn test_contact_form_is_not_behind_auth() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/contact"]["post"].get("security").is_none());
        assert!(doc["paths"]["/contact"]["get"]["security"].is_array());
        assert!(doc["components"]["securitySchemes"]["bearerAuth"].is_object());
    }
}
