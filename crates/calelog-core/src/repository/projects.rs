use crate::error::CoreError;
use crate::models::Project;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::ProjectRepository for SqliteRepository {
    async fn add_project(
        &self,
        user_id: Uuid,
        name: String,
        description: Option<String>,
    ) -> Result<Project, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "project name must not be empty".to_string(),
            ));
        }

        let project = sqlx::query_as(
            r#"INSERT INTO projects (id, user_id, name, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        Ok(project)
    }

    async fn find_project_by_name(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Option<Project>, CoreError> {
        let project = sqlx::query_as("SELECT * FROM projects WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(project)
    }

    async fn find_projects(&self, user_id: Uuid) -> Result<Vec<Project>, CoreError> {
        let projects =
            sqlx::query_as("SELECT * FROM projects WHERE user_id = $1 ORDER BY created_at ASC")
                .bind(user_id)
                .fetch_all(self.pool())
                .await?;
        Ok(projects)
    }

    async fn delete_project(&self, user_id: Uuid, name: String) -> Result<(), CoreError> {
        let project: Option<Project> =
            sqlx::query_as("SELECT * FROM projects WHERE user_id = $1 AND name = $2")
                .bind(user_id)
                .bind(&name)
                .fetch_optional(self.pool())
                .await?;

        let project = project.ok_or_else(|| CoreError::NotFound("Project not found".to_string()))?;

        // Refuse while schedules still reference the project
        let schedule_count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM schedules WHERE project_id = $1")
                .bind(project.id)
                .fetch_one(self.pool())
                .await?;

        if schedule_count.0 > 0 {
            return Err(CoreError::InvalidInput(format!(
                "Cannot delete project '{}' because it has {} associated schedule(s). Delete or move the schedules first.",
                name, schedule_count.0
            )));
        }

        let result = sqlx::query("DELETE FROM projects WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
