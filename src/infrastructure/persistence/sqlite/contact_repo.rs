//! SQLite Contact Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{ContactRepositoryPort, RepositoryError};
use crate::domain::contact::{Contact, ContactDraft, ContactPatch};

/// SQLite Contact Repository
pub struct SqliteContactRepository {
    pool: DbPool,
}

impl SqliteContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    description: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            description: row.description,
        }
    }
}

#[async_trait]
impl ContactRepositoryPort for SqliteContactRepository {
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, RepositoryError> {
        let row: ContactRow = sqlx::query_as(
            r#"
            INSERT INTO contacts (name, email, phone, description)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, phone, description
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, phone, description FROM contacts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, RepositoryError> {
        let row: Option<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, phone, description FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Contact::from))
    }

    async fn update(
        &self,
        id: i64,
        patch: &ContactPatch,
    ) -> Result<Option<Contact>, RepositoryError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        // 单条语句完成合并，同一记录的并发更新以最后提交者为准
        let row: Option<ContactRow> = sqlx::query_as(
            r#"
            UPDATE contacts SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING id, name, email, phone, description
            "#,
        )
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Contact::from))
    }

    async fn delete(&self, id: i64) -> Result<Option<Contact>, RepositoryError> {
        let row: Option<ContactRow> = sqlx::query_as(
            "DELETE FROM contacts WHERE id = ? RETURNING id, name, email, phone, description",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Contact::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteContactRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteContactRepository::new(pool)
    }

    fn draft(name: &str) -> ContactDraft {
        ContactDraft {
            name: name.to_string(),
            email: "a@x.com".to_string(),
            phone: "1234567890".to_string(),
            description: "d".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;
        let created = repo.insert(&draft("A")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.name, "A");

        assert!(repo.find_by_id(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let repo = repo().await;
        let a = repo.insert(&draft("A")).await.unwrap();
        let b = repo.insert(&draft("B")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_omitted_fields() {
        let repo = repo().await;
        let created = repo.insert(&draft("A")).await.unwrap();

        let patch = ContactPatch {
            name: Some("B".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "B");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.phone, "1234567890");
        assert_eq!(updated.description, "d");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_return_none() {
        let repo = repo().await;
        let patch = ContactPatch {
            name: Some("B".to_string()),
            ..Default::default()
        };
        assert!(repo.update(7, &patch).await.unwrap().is_none());
        assert!(repo.update(7, &ContactPatch::default()).await.unwrap().is_none());
        assert!(repo.delete(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = repo().await;
        let first = repo.insert(&draft("A")).await.unwrap();
        let second = repo.insert(&draft("B")).await.unwrap();

        assert_eq!(repo.delete(second.id).await.unwrap(), Some(second.clone()));
        assert!(repo.delete(second.id).await.unwrap().is_none());

        let third = repo.insert(&draft("C")).await.unwrap();
        assert!(third.id > second.id);
        assert_ne!(third.id, first.id);
    }
}
