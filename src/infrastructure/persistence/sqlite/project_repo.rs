//! SQLite Project Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{ProjectRepositoryPort, RepositoryError};
use crate::domain::project::{Project, ProjectDraft, ProjectPatch};

/// SQLite Project Repository
pub struct SqliteProjectRepository {
    pool: DbPool,
}

impl SqliteProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    description: String,
    date: String,
    image: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            date: row.date,
            image: row.image,
        }
    }
}

#[async_trait]
impl ProjectRepositoryPort for SqliteProjectRepository {
    async fn insert(&self, draft: &ProjectDraft, image: &str) -> Result<Project, RepositoryError> {
        let row: ProjectRow = sqlx::query_as(
            r#"
            INSERT INTO projects (name, description, date, image)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, description, date, image
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.date)
        .bind(image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, name, description, date, image FROM projects ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, RepositoryError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "SELECT id, name, description, date, image FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Project::from))
    }

    async fn update(
        &self,
        id: i64,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, RepositoryError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            UPDATE projects SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                date = COALESCE(?, date),
                image = COALESCE(?, image)
            WHERE id = ?
            RETURNING id, name, description, date, image
            "#,
        )
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.date)
        .bind(&patch.image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Project::from))
    }

    async fn delete(&self, id: i64) -> Result<Option<Project>, RepositoryError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "DELETE FROM projects WHERE id = ? RETURNING id, name, description, date, image",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Project::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteProjectRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteProjectRepository::new(pool)
    }

    fn draft() -> ProjectDraft {
        ProjectDraft {
            name: "Site".to_string(),
            description: "Landing page".to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_with_image_path() {
        let repo = repo().await;
        let created = repo.insert(&draft(), "/uploads/1-a.png").await.unwrap();
        assert_eq!(created.image, "/uploads/1-a.png");
        assert_eq!(repo.find_all().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_path() {
        let repo = repo().await;
        let created = repo.insert(&draft(), "/uploads/1-a.png").await.unwrap();

        let patch = ProjectPatch {
            date: Some("2025".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.date, "2025");
        assert_eq!(updated.image, "/uploads/1-a.png");
        assert_eq!(updated.name, "Site");

        let patch = ProjectPatch::default().with_image("/uploads/2-b.png");
        let updated = repo.update(created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.image, "/uploads/2-b.png");
        assert_eq!(updated.date, "2025");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let repo = repo().await;
        let created = repo.insert(&draft(), "/uploads/1-a.png").await.unwrap();

        assert_eq!(repo.delete(created.id).await.unwrap(), Some(created.clone()));
        assert!(repo.delete(created.id).await.unwrap().is_none());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
