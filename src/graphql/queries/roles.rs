use super::prelude::*;

#[derive(Default)]
pub struct RoleQueries;

#[Object]
impl RoleQueries {
    /// Get a casting assignment by its composite id
    async fn role(&self, ctx: &Context<'_>, id: CrewMemberId) -> Result<Option<Role>> {
        let roles = ctx.data_unchecked::<RoleService>();
        Ok(roles.get(id.film_id, id.person_id).await.extend()?.map(Role::from))
    }
}
