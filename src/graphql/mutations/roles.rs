use super::prelude::*;

#[derive(Default)]
pub struct RoleMutations;

#[Object]
impl RoleMutations {
    /// Cast a person in a film
    #[graphql(guard = "AdminGuard")]
    async fn create_role(&self, ctx: &Context<'_>, input: RoleInput) -> Result<Role> {
        let user = ctx.current_user()?;
        let roles = ctx.data_unchecked::<RoleService>();
        let record = roles
            .create(user, input.id.film_id, input.id.person_id, &input.character)
            .await.extend()?;
        Ok(Role::from(record))
    }

    /// Change the character of an existing role
    #[graphql(guard = "AdminGuard")]
    async fn update_role(&self, ctx: &Context<'_>, input: RoleInput) -> Result<Role> {
        let user = ctx.current_user()?;
        let roles = ctx.data_unchecked::<RoleService>();
        let record = roles
            .update(user, input.id.film_id, input.id.person_id, &input.character)
            .await.extend()?;
        Ok(Role::from(record))
    }

    /// Remove a person from the cast of a film
    #[graphql(guard = "AdminGuard")]
    async fn delete_role(&self, ctx: &Context<'_>, id: CrewMemberId) -> Result<DeleteRolePayload> {
        let user = ctx.current_user()?;
        let roles = ctx.data_unchecked::<RoleService>();
        roles.delete(user, id.film_id, id.person_id).await.extend()?;
        Ok(DeleteRolePayload {
            film_id: id.film_id,
            person_id: id.person_id,
        })
    }
}
