//! Role service: composite-key CRUD over casting assignments

use crate::db::{Database, RoleRecord};
use crate::error::{Error, Result};
use crate::services::auth::CurrentUser;
use crate::services::validate_character;

#[derive(Clone)]
pub struct RoleService {
    db: Database,
}

impl RoleService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a role by its composite key
    pub async fn get(&self, film_id: i64, person_id: i64) -> Result<Option<RoleRecord>> {
        self.db.roles().get(film_id, person_id).await
    }

    /// List the cast of a film
    pub async fn cast(&self, film_id: i64) -> Result<Vec<RoleRecord>> {
        self.db.roles().list_by_film(film_id).await
    }

    /// List all roles played by a person
    pub async fn filmography(&self, person_id: i64) -> Result<Vec<RoleRecord>> {
        self.db.roles().list_by_person(person_id).await
    }

    /// Create a role (admin only). Both the film and the person must exist,
    /// and a person can be cast in a film only once.
    pub async fn create(
        &self,
        actor: &CurrentUser,
        film_id: i64,
        person_id: i64,
        character: &str,
    ) -> Result<RoleRecord> {
        actor.require_admin()?;
        validate_character(character)?;

        if !self.db.films().exists(film_id).await? {
            return Err(Error::film_not_found(film_id));
        }
        if !self.db.people().exists(person_id).await? {
            return Err(Error::person_not_found(person_id));
        }
        if self.db.roles().exists(film_id, person_id).await? {
            return Err(Error::Validation(format!(
                "Person {} is already cast in film {}",
                person_id, film_id
            )));
        }

        let record = self.db.roles().create(film_id, person_id, character).await?;
        tracing::info!(film_id, person_id, character = %record.character, "Role created");
        Ok(record)
    }

    /// Update the character of a role (admin only)
    pub async fn update(
        &self,
        actor: &CurrentUser,
        film_id: i64,
        person_id: i64,
        character: &str,
    ) -> Result<RoleRecord> {
        actor.require_admin()?;
        validate_character(character)?;

        self.db
            .roles()
            .update(film_id, person_id, character)
            .await?
            .ok_or_else(|| Error::role_not_found(film_id, person_id))
    }

    /// Delete a role (admin only). Unlike film and person deletes, deleting
    /// a missing role is reported as not found.
    pub async fn delete(&self, actor: &CurrentUser, film_id: i64, person_id: i64) -> Result<()> {
        actor.require_admin()?;

        if !self.db.roles().delete(film_id, person_id).await? {
            return Err(Error::role_not_found(film_id, person_id));
        }
        tracing::info!(film_id, person_id, "Role deleted");
        Ok(())
    }
}
