//! GraphQL schema assembly
//!
//! Domain query and mutation structs are merged into a single root pair.
//! Services are injected as schema data; the per-request caller identity is
//! injected by the HTTP handler instead.

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::{AuthService, FilmService, PersonService, RoleService};

use super::mutations::{AuthMutations, FilmMutations, PersonMutations, RoleMutations};
use super::queries::{FilmQueries, PersonQueries, RoleQueries};

/// The GraphQL schema type
pub type FilmDbSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(FilmQueries, PersonQueries, RoleQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, FilmMutations, PersonMutations, RoleMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(
    db: Database,
    auth: AuthService,
    films: FilmService,
    people: PersonService,
    roles: RoleService,
) -> FilmDbSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .data(auth)
    .data(films)
    .data(people)
    .data(roles)
    .finish()
}
