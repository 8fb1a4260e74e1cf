use super::prelude::*;

#[derive(Default)]
pub struct PersonMutations;

#[Object]
impl PersonMutations {
    /// Create a person
    #[graphql(guard = "AdminGuard")]
    async fn create_person(&self, ctx: &Context<'_>, input: PersonDataInput) -> Result<Person> {
        let user = ctx.current_user()?;
        let people = ctx.data_unchecked::<PersonService>();
        let record = people.create(user, input.into()).await.extend()?;
        Ok(Person::from(record))
    }

    /// Replace the stored fields of a person
    #[graphql(guard = "AdminGuard")]
    async fn update_person(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: PersonDataInput,
    ) -> Result<Person> {
        let user = ctx.current_user()?;
        let people = ctx.data_unchecked::<PersonService>();
        let record = people.update(user, id, input.into()).await.extend()?;
        Ok(Person::from(record))
    }

    /// Delete a person with their roles and director links.
    /// Deleting an unknown id is a no-op.
    #[graphql(guard = "AdminGuard")]
    async fn delete_person(&self, ctx: &Context<'_>, id: i64) -> Result<DeletePersonPayload> {
        let user = ctx.current_user()?;
        let people = ctx.data_unchecked::<PersonService>();
        people.delete(user, id).await.extend()?;
        Ok(DeletePersonPayload { id })
    }
}
