use super::prelude::*;

#[derive(Default)]
pub struct FilmQueries;

#[Object]
impl FilmQueries {
    /// Get a page of films, ordered by id
    async fn films(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0, validator(minimum = 0))] page: i32,
        #[graphql(default = 20, validator(minimum = 1, maximum = 100))] page_size: i32,
    ) -> Result<Vec<Film>> {
        let films = ctx.data_unchecked::<FilmService>();
        let offset = i64::from(page) * i64::from(page_size);
        let (records, _total) = films
            .list(offset, i64::from(page_size), None, SortOrder::asc("id"))
            .await.extend()?;
        Ok(records.into_iter().map(Film::from).collect())
    }

    /// Get a film by id
    async fn film(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Film>> {
        let films = ctx.data_unchecked::<FilmService>();
        Ok(films.get(id).await.extend()?.map(Film::from))
    }
}
