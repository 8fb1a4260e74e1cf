//! GraphQL type definitions
//!
//! These types mirror the domain records but are decorated with async-graphql
//! attributes. Relationship fields (directors, cast, filmography) resolve
//! lazily against the service layer.

use async_graphql::{ComplexObject, Context, InputObject, Result, ResultExt, SimpleObject};

use crate::db::{FilmRecord, PersonRecord, RoleRecord};
use crate::services::{FilmService, RoleService};

/// A film in the catalog
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

#[ComplexObject]
impl Film {
    /// People who directed this film
    async fn directors(&self, ctx: &Context<'_>) -> Result<Vec<Person>> {
        let films = ctx.data_unchecked::<FilmService>();
        let records = films.directors(self.id).await.extend()?;
        Ok(records.into_iter().map(Person::from).collect())
    }

    /// Casting assignments for this film
    async fn cast(&self, ctx: &Context<'_>) -> Result<Vec<Role>> {
        let roles = ctx.data_unchecked::<RoleService>();
        let records = roles.cast(self.id).await.extend()?;
        Ok(records.into_iter().map(Role::from).collect())
    }
}

impl From<FilmRecord> for Film {
    fn from(record: FilmRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            release_date: record.release_date,
            synopsis: record.synopsis,
        }
    }
}

/// A person appearing in the catalog as cast or crew
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

#[ComplexObject]
impl Person {
    /// Films this person directed
    async fn films_directed(&self, ctx: &Context<'_>) -> Result<Vec<Film>> {
        let films = ctx.data_unchecked::<FilmService>();
        let records = films.films_directed(self.id).await.extend()?;
        Ok(records.into_iter().map(Film::from).collect())
    }

    /// Roles this person played
    async fn roles(&self, ctx: &Context<'_>) -> Result<Vec<Role>> {
        let roles = ctx.data_unchecked::<RoleService>();
        let records = roles.filmography(self.id).await.extend()?;
        Ok(records.into_iter().map(Role::from).collect())
    }
}

impl From<PersonRecord> for Person {
    fn from(record: PersonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            date_of_birth: record.date_of_birth,
        }
    }
}

/// One casting assignment linking a person to a film
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Role {
    pub film_id: i64,
    pub person_id: i64,
    pub character: String,
}

#[ComplexObject]
impl Role {
    /// The film this role belongs to
    async fn film(&self, ctx: &Context<'_>) -> Result<Option<Film>> {
        let films = ctx.data_unchecked::<FilmService>();
        Ok(films.get(self.film_id).await.extend()?.map(Film::from))
    }

    /// The person playing this role
    async fn person(&self, ctx: &Context<'_>) -> Result<Option<Person>> {
        let people = ctx.data_unchecked::<crate::services::PersonService>();
        Ok(people.get(self.person_id).await.extend()?.map(Person::from))
    }
}

impl From<RoleRecord> for Role {
    fn from(record: RoleRecord) -> Self {
        Self {
            film_id: record.film_id,
            person_id: record.person_id,
            character: record.character,
        }
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Input for creating or replacing a film
#[derive(Debug, InputObject)]
#[graphql(name = "FilmInput")]
pub struct FilmDataInput {
    #[graphql(validator(chars_min_length = 1, chars_max_length = 255))]
    pub title: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

impl From<FilmDataInput> for crate::db::FilmInput {
    fn from(input: FilmDataInput) -> Self {
        Self {
            title: input.title,
            release_date: input.release_date,
            synopsis: input.synopsis,
        }
    }
}

/// Input for creating or replacing a person
#[derive(Debug, InputObject)]
#[graphql(name = "PersonInput")]
pub struct PersonDataInput {
    #[graphql(validator(chars_min_length = 1, chars_max_length = 255))]
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

impl From<PersonDataInput> for crate::db::PersonInput {
    fn from(input: PersonDataInput) -> Self {
        Self {
            name: input.name,
            date_of_birth: input.date_of_birth,
        }
    }
}

/// Composite identifier of a casting assignment
#[derive(Debug, Clone, Copy, InputObject)]
pub struct CrewMemberId {
    pub film_id: i64,
    pub person_id: i64,
}

/// Input for creating or updating a role
#[derive(Debug, InputObject)]
pub struct RoleInput {
    pub id: CrewMemberId,
    #[graphql(validator(chars_min_length = 1, chars_max_length = 255))]
    pub character: String,
}

// ============================================================================
// Mutation Payloads
// ============================================================================

/// Payload of the deleteFilm mutation
#[derive(Debug, SimpleObject)]
pub struct DeleteFilmPayload {
    pub id: i64,
}

/// Payload of the deletePerson mutation
#[derive(Debug, SimpleObject)]
pub struct DeletePersonPayload {
    pub id: i64,
}

/// Payload of the deleteRole mutation
#[derive(Debug, SimpleObject)]
pub struct DeleteRolePayload {
    pub film_id: i64,
    pub person_id: i64,
}

/// Payload of the login mutation
#[derive(Debug, SimpleObject)]
pub struct LoginPayload {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
    pub role: String,
}
