use super::prelude::*;

#[derive(Default)]
pub struct FilmMutations;

#[Object]
impl FilmMutations {
    /// Create a film
    #[graphql(guard = "AdminGuard")]
    async fn create_film(&self, ctx: &Context<'_>, input: FilmDataInput) -> Result<Film> {
        let user = ctx.current_user()?;
        let films = ctx.data_unchecked::<FilmService>();
        let record = films.create(user, input.into()).await.extend()?;
        Ok(Film::from(record))
    }

    /// Replace the stored fields of a film
    #[graphql(guard = "AdminGuard")]
    async fn update_film(&self, ctx: &Context<'_>, id: i64, input: FilmDataInput) -> Result<Film> {
        let user = ctx.current_user()?;
        let films = ctx.data_unchecked::<FilmService>();
        let record = films.update(user, id, input.into()).await.extend()?;
        Ok(Film::from(record))
    }

    /// Delete a film with its roles and director links.
    /// Deleting an unknown id is a no-op.
    #[graphql(guard = "AdminGuard")]
    async fn delete_film(&self, ctx: &Context<'_>, id: i64) -> Result<DeleteFilmPayload> {
        let user = ctx.current_user()?;
        let films = ctx.data_unchecked::<FilmService>();
        films.delete(user, id).await.extend()?;
        Ok(DeleteFilmPayload { id })
    }

    /// Replace the full director list of a film
    #[graphql(guard = "AdminGuard")]
    async fn update_directors(
        &self,
        ctx: &Context<'_>,
        film_id: i64,
        director_ids: Vec<i64>,
    ) -> Result<Film> {
        let user = ctx.current_user()?;
        let films = ctx.data_unchecked::<FilmService>();
        let record = films.set_directors(user, film_id, &director_ids).await.extend()?;
        Ok(Film::from(record))
    }
}
