//! Contact Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ContactRepositoryPort;
use crate::application::queries::ListContacts;
use crate::domain::contact::Contact;

/// ListContacts Handler
pub struct ListContactsHandler {
    contact_repo: Arc<dyn ContactRepositoryPort>,
}

impl ListContactsHandler {
    pub fn new(contact_repo: Arc<dyn ContactRepositoryPort>) -> Self {
        Self { contact_repo }
    }

    pub async fn handle(&self, _query: ListContacts) -> Result<Vec<Contact>, ApplicationError> {
        let contacts = self.contact_repo.find_all().await?;
        Ok(contacts)
    }
}
