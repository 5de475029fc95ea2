//! Contact Command Handlers

use std::sync::Arc;

use crate::application::commands::{AddContact, DeleteContact, UpdateContact};
use crate::application::error::ApplicationError;
use crate::application::ports::ContactRepositoryPort;
use crate::domain::contact::{Contact, ContactDraft, ContactPatch};

// ============================================================================
// AddContact
// ============================================================================

/// AddContact Handler
pub struct AddContactHandler {
    contact_repo: Arc<dyn ContactRepositoryPort>,
}

impl AddContactHandler {
    pub fn new(contact_repo: Arc<dyn ContactRepositoryPort>) -> Self {
        Self { contact_repo }
    }

    pub async fn handle(&self, command: AddContact) -> Result<Contact, ApplicationError> {
        let draft = ContactDraft::parse(command.input).map_err(ApplicationError::validation)?;

        let contact = self.contact_repo.insert(&draft).await?;

        tracing::info!(contact_id = contact.id, "Contact created");

        Ok(contact)
    }
}

// ============================================================================
// UpdateContact
// ============================================================================

/// UpdateContact Handler
pub struct UpdateContactHandler {
    contact_repo: Arc<dyn ContactRepositoryPort>,
}

impl UpdateContactHandler {
    pub fn new(contact_repo: Arc<dyn ContactRepositoryPort>) -> Self {
        Self { contact_repo }
    }

    pub async fn handle(&self, command: UpdateContact) -> Result<Contact, ApplicationError> {
        let contact_id = command.contact_id;

        // 先确认存在，不存在的记录不做字段校验
        self.contact_repo
            .find_by_id(contact_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contact", contact_id))?;

        let patch = ContactPatch::parse(command.input).map_err(ApplicationError::validation)?;

        let contact = self
            .contact_repo
            .update(contact_id, &patch)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contact", contact_id))?;

        tracing::info!(contact_id = contact_id, "Contact updated");

        Ok(contact)
    }
}

// ============================================================================
// DeleteContact
// ============================================================================

/// DeleteContact Handler
pub struct DeleteContactHandler {
    contact_repo: Arc<dyn ContactRepositoryPort>,
}

impl DeleteContactHandler {
    pub fn new(contact_repo: Arc<dyn ContactRepositoryPort>) -> Self {
        Self { contact_repo }
    }

    pub async fn handle(&self, command: DeleteContact) -> Result<Contact, ApplicationError> {
        let contact_id = command.contact_id;

        let contact = self
            .contact_repo
            .delete(contact_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contact", contact_id))?;

        tracing::info!(contact_id = contact_id, name = %contact.name, "Contact deleted");

        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::ContactInput;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteContactRepository,
    };

    async fn repo() -> Arc<dyn ContactRepositoryPort> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        Arc::new(SqliteContactRepository::new(pool))
    }

    fn input(name: &str, email: &str) -> ContactInput {
        ContactInput {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some("1234567890".to_string()),
            description: Some("d".to_string()),
        }
    }

    #[tokio::test]
    async fn test_invalid_add_writes_nothing() {
        let repo = repo().await;
        let handler = AddContactHandler::new(repo.clone());

        let err = handler
            .handle(AddContact {
                input: input("A", "broken"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(ref e) if e.len() == 1));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_supplied_field() {
        let repo = repo().await;
        let created = AddContactHandler::new(repo.clone())
            .handle(AddContact {
                input: input("A", "a@x.com"),
            })
            .await
            .unwrap();

        let err = UpdateContactHandler::new(repo.clone())
            .handle(UpdateContact {
                contact_id: created.id,
                input: ContactInput {
                    email: Some("nope".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_missing_contact_is_not_found_before_validation() {
        let repo = repo().await;

        let err = UpdateContactHandler::new(repo)
            .handle(UpdateContact {
                contact_id: 999,
                input: ContactInput {
                    email: Some("bad".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_update_returns_record_unchanged() {
        let repo = repo().await;
        let created = AddContactHandler::new(repo.clone())
            .handle(AddContact {
                input: input("A", "a@x.com"),
            })
            .await
            .unwrap();

        let updated = UpdateContactHandler::new(repo)
            .handle(UpdateContact {
                contact_id: created.id,
                input: ContactInput::default(),
            })
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = repo().await;
        let created = AddContactHandler::new(repo.clone())
            .handle(AddContact {
                input: input("A", "a@x.com"),
            })
            .await
            .unwrap();

        let handler = DeleteContactHandler::new(repo.clone());
        let removed = handler
            .handle(DeleteContact {
                contact_id: created.id,
            })
            .await
            .unwrap();
        assert_eq!(removed, created);

        let err = handler
            .handle(DeleteContact {
                contact_id: created.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
