//! Database connection and repositories

pub mod films;
pub mod people;
pub mod roles;
pub mod sort;
pub mod users;

use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use films::{FilmInput, FilmPatch, FilmRecord, FilmRepository};
pub use people::{PersonInput, PersonPatch, PersonRecord, PersonRepository};
pub use roles::{RoleRecord, RoleRepository};
pub use sort::{FILM_SORT_FIELDS, PERSON_SORT_FIELDS, SortOrder, filter_sort};
pub use users::{CreateUser, UserRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the maximum connection pool size from environment or default
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(Self::get_max_connections())
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a film repository
    pub fn films(&self) -> FilmRepository {
        FilmRepository::new(self.pool.clone())
    }

    /// Get a people repository
    pub fn people(&self) -> PersonRepository {
        PersonRepository::new(self.pool.clone())
    }

    /// Get a role repository
    pub fn roles(&self) -> RoleRepository {
        RoleRepository::new(self.pool.clone())
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
