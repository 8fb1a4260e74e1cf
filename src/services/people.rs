//! Person service: CRUD, search, existence checks, cascade delete

use crate::db::{Database, PersonInput, PersonPatch, PersonRecord, SortOrder};
use crate::error::{Error, Result};
use crate::services::auth::CurrentUser;
use crate::services::validate_name;

#[derive(Clone)]
pub struct PersonService {
    db: Database,
}

impl PersonService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Paged listing with optional name filter. The caller supplies an
    /// already-whitelisted sort.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        name_filter: Option<&str>,
        sort: SortOrder,
    ) -> Result<(Vec<PersonRecord>, i64)> {
        self.db.people().list(offset, limit, name_filter, sort).await
    }

    /// Get a person by id
    pub async fn get(&self, id: i64) -> Result<Option<PersonRecord>> {
        self.db.people().get_by_id(id).await
    }

    /// Get people by ids, silently dropping ids that do not exist
    pub async fn get_many(&self, ids: &[i64]) -> Result<Vec<PersonRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.db.people().get_by_ids(ids).await
    }

    /// Create a person (admin only)
    pub async fn create(&self, actor: &CurrentUser, input: PersonInput) -> Result<PersonRecord> {
        actor.require_admin()?;
        validate_name(&input.name)?;

        let record = self.db.people().create(input).await?;
        tracing::info!(person_id = record.id, name = %record.name, "Person created");
        Ok(record)
    }

    /// Update a person (admin only). Unknown ids are an error, never an insert.
    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: i64,
        input: PersonInput,
    ) -> Result<PersonRecord> {
        actor.require_admin()?;
        validate_name(&input.name)?;

        self.db
            .people()
            .update(id, input)
            .await?
            .ok_or_else(|| Error::person_not_found(id))
    }

    /// Partially update a person (admin only), keeping fields the patch
    /// leaves absent. Unknown ids are an error.
    pub async fn patch(
        &self,
        actor: &CurrentUser,
        id: i64,
        patch: PersonPatch,
    ) -> Result<PersonRecord> {
        actor.require_admin()?;

        let current = self
            .db
            .people()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::person_not_found(id))?;

        let input = patch.apply(current);
        validate_name(&input.name)?;

        self.db
            .people()
            .update(id, input)
            .await?
            .ok_or_else(|| Error::person_not_found(id))
    }

    /// Delete a person (admin only). The repository detaches director links
    /// and deletes the person's roles in the same transaction. Deleting an
    /// unknown id is a no-op.
    pub async fn delete(&self, actor: &CurrentUser, id: i64) -> Result<()> {
        actor.require_admin()?;

        if self.db.people().delete(id).await? {
            tracing::info!(person_id = id, "Person deleted with roles and director links");
        }
        Ok(())
    }

    /// Check whether a person exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        self.db.people().exists(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_many_short_circuits_on_empty_input() {
        // Lazy pool: never connects, so any query issued here would error
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        let service = PersonService::new(Database::new(pool));

        let records = service.get_many(&[]).await.unwrap();
        assert!(records.is_empty());
    }
}
