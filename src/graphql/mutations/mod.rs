pub mod auth;
pub mod films;
pub mod people;
pub mod roles;

pub use auth::AuthMutations;
pub use films::FilmMutations;
pub use people::PersonMutations;
pub use roles::RoleMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result, ResultExt};

    pub(crate) use crate::graphql::auth::{AdminGuard, AuthExt};
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{FilmService, PersonService, RoleService};
}
