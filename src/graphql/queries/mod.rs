pub mod films;
pub mod people;
pub mod roles;

pub use films::FilmQueries;
pub use people::PersonQueries;
pub use roles::RoleQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result, ResultExt};

    pub(crate) use crate::db::sort::SortOrder;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{FilmService, PersonService, RoleService};
}
