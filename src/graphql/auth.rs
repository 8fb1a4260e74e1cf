//! GraphQL authentication and authorization
//!
//! The HTTP handler verifies the bearer token and stores the caller identity
//! in the request data; resolvers read it back through [`AuthExt`]. Mutations
//! are annotated with `#[graphql(guard = "AdminGuard")]`.

use async_graphql::{Context, ErrorExtensions, Result};

use crate::services::CurrentUser;

/// Extension trait to get the authenticated caller from GraphQL context
pub trait AuthExt {
    /// Get the authenticated caller, or return an UNAUTHORIZED error
    fn current_user(&self) -> Result<&CurrentUser>;

    /// Get the authenticated caller if present
    fn try_current_user(&self) -> Option<&CurrentUser>;
}

impl AuthExt for Context<'_> {
    fn current_user(&self) -> Result<&CurrentUser> {
        self.data_opt::<CurrentUser>().ok_or_else(|| {
            async_graphql::Error::new("Authentication required")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
        })
    }

    fn try_current_user(&self) -> Option<&CurrentUser> {
        self.data_opt::<CurrentUser>()
    }
}

/// Guard that requires the admin role on mutating GraphQL operations
pub struct AdminGuard;

impl async_graphql::Guard for AdminGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.current_user().and_then(|user| {
            if user.is_admin() {
                Ok(())
            } else {
                Err(async_graphql::Error::new("Admin role required")
                    .extend_with(|_, e| e.set("code", "FORBIDDEN")))
            }
        });
        async move { result }
    }
}
