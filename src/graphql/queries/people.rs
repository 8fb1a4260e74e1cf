use super::prelude::*;

#[derive(Default)]
pub struct PersonQueries;

#[Object]
impl PersonQueries {
    /// Get a page of people, ordered by id
    async fn people(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0, validator(minimum = 0))] page: i32,
        #[graphql(default = 20, validator(minimum = 1, maximum = 100))] page_size: i32,
    ) -> Result<Vec<Person>> {
        let people = ctx.data_unchecked::<PersonService>();
        let offset = i64::from(page) * i64::from(page_size);
        let (records, _total) = people
            .list(offset, i64::from(page_size), None, SortOrder::asc("id"))
            .await.extend()?;
        Ok(records.into_iter().map(Person::from).collect())
    }

    /// Get a person by id
    async fn person(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Person>> {
        let people = ctx.data_unchecked::<PersonService>();
        Ok(people.get(id).await.extend()?.map(Person::from))
    }

    /// Batch-fetch people by id, used by clients resolving director lists.
    /// Unknown ids are silently omitted from the result.
    async fn people_by_ids(&self, ctx: &Context<'_>, ids: Vec<i64>) -> Result<Vec<Person>> {
        let people = ctx.data_unchecked::<PersonService>();
        let records = people.get_many(&ids).await.extend()?;
        Ok(records.into_iter().map(Person::from).collect())
    }
}
