//! People database repository

use sqlx::PgPool;

use crate::db::sort::SortOrder;
use crate::error::Result;

/// Person record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PersonRecord {
    pub id: i64,
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Input for creating or replacing a person
#[derive(Debug, Clone)]
pub struct PersonInput {
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

/// Partial update for a person; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

impl PersonPatch {
    /// Merge this patch over an existing record into a full replacement input
    pub fn apply(self, current: PersonRecord) -> PersonInput {
        PersonInput {
            name: self.name.unwrap_or(current.name),
            date_of_birth: self.date_of_birth.or(current.date_of_birth),
        }
    }
}

pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List people with paging, optional name filter, and a whitelisted sort.
    /// Returns the page of records plus the total count of matching rows.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        name_filter: Option<&str>,
        sort: SortOrder,
    ) -> Result<(Vec<PersonRecord>, i64)> {
        match name_filter {
            Some(name) => {
                let pattern = format!("%{}%", name.to_lowercase());
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM people WHERE LOWER(name) LIKE $1")
                        .bind(&pattern)
                        .fetch_one(&self.pool)
                        .await?;

                let records = sqlx::query_as::<_, PersonRecord>(&format!(
                    r#"
                    SELECT id, name, date_of_birth, created_at, updated_at
                    FROM people
                    WHERE LOWER(name) LIKE $1
                    ORDER BY {}
                    LIMIT $2 OFFSET $3
                    "#,
                    sort.to_sql()
                ))
                .bind(&pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                Ok((records, total))
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people")
                    .fetch_one(&self.pool)
                    .await?;

                let records = sqlx::query_as::<_, PersonRecord>(&format!(
                    r#"
                    SELECT id, name, date_of_birth, created_at, updated_at
                    FROM people
                    ORDER BY {}
                    LIMIT $1 OFFSET $2
                    "#,
                    sort.to_sql()
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                Ok((records, total))
            }
        }
    }

    /// Get a person by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<PersonRecord>> {
        let record = sqlx::query_as::<_, PersonRecord>(
            r#"
            SELECT id, name, date_of_birth, created_at, updated_at
            FROM people
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get people by IDs. Unknown ids are simply absent from the result.
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<PersonRecord>> {
        let records = sqlx::query_as::<_, PersonRecord>(
            r#"
            SELECT id, name, date_of_birth, created_at, updated_at
            FROM people
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Create a new person
    pub async fn create(&self, input: PersonInput) -> Result<PersonRecord> {
        let record = sqlx::query_as::<_, PersonRecord>(
            r#"
            INSERT INTO people (name, date_of_birth)
            VALUES ($1, $2)
            RETURNING id, name, date_of_birth, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(input.date_of_birth)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Replace a person's fields. Returns None if the id does not exist.
    pub async fn update(&self, id: i64, input: PersonInput) -> Result<Option<PersonRecord>> {
        let record = sqlx::query_as::<_, PersonRecord>(
            r#"
            UPDATE people SET
                name = $2,
                date_of_birth = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, date_of_birth, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.date_of_birth)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete a person, detaching director links and deleting their roles
    /// in the same transaction. Returns false when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM roles WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM film_directors WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a person with the given id exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM people WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// List the directors of a film
    pub async fn directors_of(&self, film_id: i64) -> Result<Vec<PersonRecord>> {
        let records = sqlx::query_as::<_, PersonRecord>(
            r#"
            SELECT p.id, p.name, p.date_of_birth, p.created_at, p.updated_at
            FROM people p
            JOIN film_directors fd ON fd.person_id = p.id
            WHERE fd.film_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(film_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_replaces_only_present_fields() {
        let current = PersonRecord {
            id: 1,
            name: "Sigourney Weaver".to_string(),
            date_of_birth: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let patch = PersonPatch {
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1949, 10, 8),
            ..Default::default()
        };
        let input = patch.apply(current);
        assert_eq!(input.name, "Sigourney Weaver");
        assert!(input.date_of_birth.is_some());
    }
}
