//! Contact HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::application::{AddContact, AuthIdentity, DeleteContact, ListContacts, UpdateContact};
use crate::domain::contact::{Contact, ContactInput};
use crate::infrastructure::http::dto::{ErrorResponse, MessageResponse, ValidationErrorResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{resource_id, JsonBody, PatchBody};
use crate::infrastructure::http::state::AppState;

const RESOURCE: &str = "Contact";

/// 新建联系人（公开的联系表单）
#[utoipa::path(
    post,
    path = "/contact",
    tag = "Contacts",
    operation_id = "addContact",
    request_body = ContactInput,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn add_contact(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ContactInput>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let contact = state
        .add_contact_handler
        .handle(AddContact { input })
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to create contact"))?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// 列出全部联系人
#[utoipa::path(
    get,
    path = "/contact",
    tag = "Contacts",
    operation_id = "listContacts",
    responses(
        (status = 200, description = "All contacts, ascending id", body = [Contact]),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state
        .list_contacts_handler
        .handle(ListContacts)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to fetch contacts"))?;

    Ok(Json(contacts))
}

/// 局部更新联系人
#[utoipa::path(
    put,
    path = "/contact/{id}",
    tag = "Contacts",
    operation_id = "updateContact",
    params(("id" = i64, Path, description = "Contact id")),
    request_body = ContactInput,
    responses(
        (status = 200, description = "Merged contact", body = Contact),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthIdentity>,
    Path(id): Path<String>,
    PatchBody(input): PatchBody<ContactInput>,
) -> Result<Json<Contact>, ApiError> {
    let contact_id = resource_id(&id, RESOURCE)?;
    tracing::debug!(subject = %identity.subject, contact_id, "Update contact requested");

    let contact = state
        .update_contact_handler
        .handle(UpdateContact { contact_id, input })
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to update contact"))?;

    Ok(Json(contact))
}

/// 删除联系人
#[utoipa::path(
    delete,
    path = "/contact/{id}",
    tag = "Contacts",
    operation_id = "deleteContact",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted", body = MessageResponse),
        (status = 403, description = "Access denied", body = MessageResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthIdentity>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let contact_id = resource_id(&id, RESOURCE)?;
    tracing::debug!(subject = %identity.subject, contact_id, "Delete contact requested");

    state
        .delete_contact_handler
        .handle(DeleteContact { contact_id })
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to delete contact"))?;

    Ok(Json(MessageResponse::new("Contact deleted successfully")))
}
