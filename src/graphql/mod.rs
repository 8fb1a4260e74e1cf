//! GraphQL API surface
//!
//! Queries are open to anonymous callers; mutations other than `login`
//! require a bearer token carrying the admin role.

pub mod auth;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use schema::{FilmDbSchema, MutationRoot, QueryRoot, build_schema};
