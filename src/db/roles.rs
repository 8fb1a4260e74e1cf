//! Role database repository
//!
//! A role is one casting assignment, keyed by (film_id, person_id).

use sqlx::PgPool;

use crate::error::Result;

/// Role record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleRecord {
    pub film_id: i64,
    pub person_id: i64,
    pub character: String,
}

pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a role by its composite key
    pub async fn get(&self, film_id: i64, person_id: i64) -> Result<Option<RoleRecord>> {
        let record = sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT film_id, person_id, character
            FROM roles
            WHERE film_id = $1 AND person_id = $2
            "#,
        )
        .bind(film_id)
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// List the cast of a film
    pub async fn list_by_film(&self, film_id: i64) -> Result<Vec<RoleRecord>> {
        let records = sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT film_id, person_id, character
            FROM roles
            WHERE film_id = $1
            ORDER BY person_id
            "#,
        )
        .bind(film_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// List all roles played by a person
    pub async fn list_by_person(&self, person_id: i64) -> Result<Vec<RoleRecord>> {
        let records = sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT film_id, person_id, character
            FROM roles
            WHERE person_id = $1
            ORDER BY film_id
            "#,
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Create a new role
    pub async fn create(
        &self,
        film_id: i64,
        person_id: i64,
        character: &str,
    ) -> Result<RoleRecord> {
        let record = sqlx::query_as::<_, RoleRecord>(
            r#"
            INSERT INTO roles (film_id, person_id, character)
            VALUES ($1, $2, $3)
            RETURNING film_id, person_id, character
            "#,
        )
        .bind(film_id)
        .bind(person_id)
        .bind(character)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Update the character of a role. Returns None if the role does not exist.
    pub async fn update(
        &self,
        film_id: i64,
        person_id: i64,
        character: &str,
    ) -> Result<Option<RoleRecord>> {
        let record = sqlx::query_as::<_, RoleRecord>(
            r#"
            UPDATE roles SET character = $3
            WHERE film_id = $1 AND person_id = $2
            RETURNING film_id, person_id, character
            "#,
        )
        .bind(film_id)
        .bind(person_id)
        .bind(character)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete a role. Returns false when the role does not exist.
    pub async fn delete(&self, film_id: i64, person_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE film_id = $1 AND person_id = $2")
            .bind(film_id)
            .bind(person_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a role with the given composite key exists
    pub async fn exists(&self, film_id: i64, person_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM roles WHERE film_id = $1 AND person_id = $2)",
        )
        .bind(film_id)
        .bind(person_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
