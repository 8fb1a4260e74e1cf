//! Film database repository

use sqlx::PgPool;

use crate::db::sort::SortOrder;
use crate::error::Result;

/// Film record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FilmRecord {
    pub id: i64,
    pub title: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Input for creating or replacing a film
#[derive(Debug, Clone)]
pub struct FilmInput {
    pub title: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

/// Partial update for a film; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

impl FilmPatch {
    /// Merge this patch over an existing record into a full replacement input
    pub fn apply(self, current: FilmRecord) -> FilmInput {
        FilmInput {
            title: self.title.unwrap_or(current.title),
            release_date: self.release_date.or(current.release_date),
            synopsis: self.synopsis.or(current.synopsis),
        }
    }
}

pub struct FilmRepository {
    pool: PgPool,
}

impl FilmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List films with paging, an optional title/synopsis filter, and a
    /// whitelisted sort.
    /// Returns the page of records plus the total count of matching rows.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        title_filter: Option<&str>,
        sort: SortOrder,
    ) -> Result<(Vec<FilmRecord>, i64)> {
        match title_filter {
            Some(title) => {
                let pattern = format!("%{}%", title.to_lowercase());
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM films \
                     WHERE LOWER(title) LIKE $1 OR LOWER(COALESCE(synopsis, '')) LIKE $1",
                )
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

                let records = sqlx::query_as::<_, FilmRecord>(&format!(
                    r#"
                    SELECT id, title, release_date, synopsis, created_at, updated_at
                    FROM films
                    WHERE LOWER(title) LIKE $1 OR LOWER(COALESCE(synopsis, '')) LIKE $1
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
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films")
                    .fetch_one(&self.pool)
                    .await?;

                let records = sqlx::query_as::<_, FilmRecord>(&format!(
                    r#"
                    SELECT id, title, release_date, synopsis, created_at, updated_at
                    FROM films
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

    /// Get a film by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FilmRecord>> {
        let record = sqlx::query_as::<_, FilmRecord>(
            r#"
            SELECT id, title, release_date, synopsis, created_at, updated_at
            FROM films
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create a new film
    pub async fn create(&self, input: FilmInput) -> Result<FilmRecord> {
        let record = sqlx::query_as::<_, FilmRecord>(
            r#"
            INSERT INTO films (title, release_date, synopsis)
            VALUES ($1, $2, $3)
            RETURNING id, title, release_date, synopsis, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(input.release_date)
        .bind(&input.synopsis)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Replace a film's fields. Returns None if the id does not exist.
    pub async fn update(&self, id: i64, input: FilmInput) -> Result<Option<FilmRecord>> {
        let record = sqlx::query_as::<_, FilmRecord>(
            r#"
            UPDATE films SET
                title = $2,
                release_date = $3,
                synopsis = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, release_date, synopsis, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.release_date)
        .bind(&input.synopsis)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete a film, removing its roles and director links in the same
    /// transaction. Returns false when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM roles WHERE film_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM film_directors WHERE film_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a film with the given id exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM films WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Replace the full set of directors for a film.
    ///
    /// The director relation is owned by the film side; the link table is
    /// rewritten in one transaction so both collections stay consistent.
    pub async fn set_directors(&self, film_id: i64, person_ids: &[i64]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM film_directors WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut *tx)
            .await?;

        for person_id in person_ids {
            sqlx::query(
                "INSERT INTO film_directors (film_id, person_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(film_id)
            .bind(person_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Add a single director link
    pub async fn add_director(&self, film_id: i64, person_id: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO film_directors (film_id, person_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(film_id)
        .bind(person_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a single director link. Returns false when no link existed.
    pub async fn remove_director(&self, film_id: i64, person_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM film_directors WHERE film_id = $1 AND person_id = $2")
                .bind(film_id)
                .bind(person_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List films directed by a person
    pub async fn list_directed_by(&self, person_id: i64) -> Result<Vec<FilmRecord>> {
        let records = sqlx::query_as::<_, FilmRecord>(
            r#"
            SELECT f.id, f.title, f.release_date, f.synopsis, f.created_at, f.updated_at
            FROM films f
            JOIN film_directors fd ON fd.film_id = f.id
            WHERE fd.person_id = $1
            ORDER BY f.title
            "#,
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_film() -> FilmRecord {
        FilmRecord {
            id: 1,
            title: "Alien".to_string(),
            release_date: Some(chrono::NaiveDate::from_ymd_opt(1979, 5, 25).unwrap()),
            synopsis: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let patch = FilmPatch {
            synopsis: Some("A commercial crew answers a distress call.".to_string()),
            ..Default::default()
        };
        let input = patch.apply(stored_film());
        assert_eq!(input.title, "Alien");
        assert_eq!(
            input.release_date,
            Some(chrono::NaiveDate::from_ymd_opt(1979, 5, 25).unwrap())
        );
        assert!(input.synopsis.is_some());
    }

    #[test]
    fn empty_patch_keeps_the_record_intact() {
        let input = FilmPatch::default().apply(stored_film());
        assert_eq!(input.title, "Alien");
        assert_eq!(input.synopsis, None);
    }
}
