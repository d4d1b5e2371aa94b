use crate::error::CoreError;
use crate::models::User;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::UserRepository for SqliteRepository {
    async fn resolve_user(&self, name: &str) -> Result<User, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "profile name must not be empty".to_string(),
            ));
        }

        if let Some(user) = sqlx::query_as("SELECT * FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?
        {
            return Ok(user);
        }

        let user = sqlx::query_as(
            r#"INSERT INTO users (id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        Ok(user)
    }
}
