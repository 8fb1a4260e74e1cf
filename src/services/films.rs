//! Film service: CRUD, search, director-link management, cascade delete

use crate::db::{Database, FilmInput, FilmPatch, FilmRecord, PersonRecord, SortOrder};
use crate::error::{Error, Result};
use crate::services::auth::CurrentUser;
use crate::services::validate_title;

#[derive(Clone)]
pub struct FilmService {
    db: Database,
}

impl FilmService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Paged listing with optional title filter. The caller supplies an
    /// already-whitelisted sort.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        title_filter: Option<&str>,
        sort: SortOrder,
    ) -> Result<(Vec<FilmRecord>, i64)> {
        self.db.films().list(offset, limit, title_filter, sort).await
    }

    /// Get a film by id
    pub async fn get(&self, id: i64) -> Result<Option<FilmRecord>> {
        self.db.films().get_by_id(id).await
    }

    /// Create a film (admin only)
    pub async fn create(&self, actor: &CurrentUser, input: FilmInput) -> Result<FilmRecord> {
        actor.require_admin()?;
        validate_title(&input.title)?;

        let record = self.db.films().create(input).await?;
        tracing::info!(film_id = record.id, title = %record.title, "Film created");
        Ok(record)
    }

    /// Update a film (admin only). Unknown ids are an error, never an insert.
    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: i64,
        input: FilmInput,
    ) -> Result<FilmRecord> {
        actor.require_admin()?;
        validate_title(&input.title)?;

        self.db
            .films()
            .update(id, input)
            .await?
            .ok_or_else(|| Error::film_not_found(id))
    }

    /// Partially update a film (admin only), keeping fields the patch
    /// leaves absent. Unknown ids are an error.
    pub async fn patch(
        &self,
        actor: &CurrentUser,
        id: i64,
        patch: FilmPatch,
    ) -> Result<FilmRecord> {
        actor.require_admin()?;

        let current = self
            .db
            .films()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::film_not_found(id))?;

        let input = patch.apply(current);
        validate_title(&input.title)?;

        self.db
            .films()
            .update(id, input)
            .await?
            .ok_or_else(|| Error::film_not_found(id))
    }

    /// Delete a film (admin only). The repository removes the film's roles
    /// and director links in the same transaction. Deleting an unknown id
    /// is a no-op.
    pub async fn delete(&self, actor: &CurrentUser, id: i64) -> Result<()> {
        actor.require_admin()?;

        if self.db.films().delete(id).await? {
            tracing::info!(film_id = id, "Film deleted with roles and director links");
        }
        Ok(())
    }

    /// Check whether a film exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        self.db.films().exists(id).await
    }

    /// List the directors of a film
    pub async fn directors(&self, film_id: i64) -> Result<Vec<PersonRecord>> {
        self.db.people().directors_of(film_id).await
    }

    /// List films directed by a person
    pub async fn films_directed(&self, person_id: i64) -> Result<Vec<FilmRecord>> {
        self.db.films().list_directed_by(person_id).await
    }

    /// Replace the directors of a film (admin only).
    ///
    /// The film and every referenced person must exist. Returns the updated
    /// film so callers can re-resolve the relation.
    pub async fn set_directors(
        &self,
        actor: &CurrentUser,
        film_id: i64,
        person_ids: &[i64],
    ) -> Result<FilmRecord> {
        actor.require_admin()?;

        let film = self
            .db
            .films()
            .get_by_id(film_id)
            .await?
            .ok_or_else(|| Error::film_not_found(film_id))?;

        for &person_id in person_ids {
            if !self.db.people().exists(person_id).await? {
                return Err(Error::person_not_found(person_id));
            }
        }

        self.db.films().set_directors(film_id, person_ids).await?;
        tracing::info!(
            film_id,
            directors = person_ids.len(),
            "Film directors replaced"
        );

        Ok(film)
    }

    /// Add one director link (admin only). Both sides must exist.
    pub async fn add_director(
        &self,
        actor: &CurrentUser,
        film_id: i64,
        person_id: i64,
    ) -> Result<()> {
        actor.require_admin()?;

        if !self.db.films().exists(film_id).await? {
            return Err(Error::film_not_found(film_id));
        }
        if !self.db.people().exists(person_id).await? {
            return Err(Error::person_not_found(person_id));
        }

        self.db.films().add_director(film_id, person_id).await
    }

    /// Remove one director link (admin only)
    pub async fn remove_director(
        &self,
        actor: &CurrentUser,
        film_id: i64,
        person_id: i64,
    ) -> Result<()> {
        actor.require_admin()?;
        self.db.films().remove_director(film_id, person_id).await?;
        Ok(())
    }
}
