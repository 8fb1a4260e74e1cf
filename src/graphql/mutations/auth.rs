use super::prelude::*;

use crate::services::AuthService;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Exchange credentials for a bearer token
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<LoginPayload> {
        let auth = ctx.data_unchecked::<AuthService>();
        let (user, issued) = auth.login(&username, &password).await.extend()?;
        Ok(LoginPayload {
            token: issued.token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
            username: user.username,
            role: user.role,
        })
    }
}
