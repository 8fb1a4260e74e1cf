//! Film REST endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::api::pagination::{Page, PageParams};
use crate::db::sort::FILM_SORT_FIELDS;
use crate::db::{FilmInput, FilmPatch, FilmRecord};
use crate::error::{Error, Result};
use crate::services::CurrentUser;

use super::people::PersonResponse;

#[derive(Debug, Serialize)]
pub struct FilmResponse {
    pub id: i64,
    pub title: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

impl From<FilmRecord> for FilmResponse {
    fn from(record: FilmRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            release_date: record.release_date,
            synopsis: record.synopsis,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FilmRequest {
    pub title: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

impl From<FilmRequest> for FilmInput {
    fn from(request: FilmRequest) -> Self {
        Self {
            title: request.title,
            release_date: request.release_date,
            synopsis: request.synopsis,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FilmListParams {
    #[serde(flatten)]
    pub page: PageParams,
    /// Optional title/synopsis substring filter
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchFilmRequest {
    pub title: Option<String>,
    pub release_date: Option<chrono::NaiveDate>,
    pub synopsis: Option<String>,
}

impl From<PatchFilmRequest> for FilmPatch {
    fn from(request: PatchFilmRequest) -> Self {
        Self {
            title: request.title,
            release_date: request.release_date,
            synopsis: request.synopsis,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectorsRequest {
    pub person_ids: Vec<i64>,
}

/// List films with paging, sorting, and optional title filter
async fn list_films(
    State(state): State<AppState>,
    Query(params): Query<FilmListParams>,
) -> Result<Json<Page<FilmResponse>>> {
    let request = params.page.resolve(FILM_SORT_FIELDS)?;
    let (records, total) = state
        .films
        .list(
            request.offset,
            request.size,
            params.title.as_deref(),
            request.sort,
        )
        .await?;

    let items = records.into_iter().map(FilmResponse::from).collect();
    Ok(Json(Page::new(items, &request, total)))
}

/// Get a film by id
async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FilmResponse>> {
    let record = state
        .films
        .get(id)
        .await?
        .ok_or_else(|| Error::film_not_found(id))?;

    Ok(Json(record.into()))
}

/// Create a film (admin only)
async fn create_film(
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<FilmRequest>,
) -> Result<(StatusCode, Json<FilmResponse>)> {
    let record = state.films.create(&actor, request.into()).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Replace a film (admin only)
async fn update_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<FilmRequest>,
) -> Result<Json<FilmResponse>> {
    let record = state.films.update(&actor, id, request.into()).await?;
    Ok(Json(record.into()))
}

/// Partially update a film (admin only)
async fn patch_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<PatchFilmRequest>,
) -> Result<Json<FilmResponse>> {
    let record = state.films.patch(&actor, id, request.into()).await?;
    Ok(Json(record.into()))
}

/// Delete a film and its relationship rows (admin only)
async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
) -> Result<StatusCode> {
    state.films.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the directors of a film
async fn list_directors(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<PersonResponse>>> {
    if !state.films.exists(id).await? {
        return Err(Error::film_not_found(id));
    }

    let directors = state.films.directors(id).await?;
    Ok(Json(directors.into_iter().map(PersonResponse::from).collect()))
}

/// Replace the directors of a film (admin only)
async fn set_directors(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<DirectorsRequest>,
) -> Result<Json<Vec<PersonResponse>>> {
    state
        .films
        .set_directors(&actor, id, &request.person_ids)
        .await?;

    let directors = state.films.directors(id).await?;
    Ok(Json(directors.into_iter().map(PersonResponse::from).collect()))
}

/// Add one director link (admin only)
async fn add_director(
    State(state): State<AppState>,
    Path((id, person_id)): Path<(i64, i64)>,
    Extension(actor): Extension<CurrentUser>,
) -> Result<StatusCode> {
    state.films.add_director(&actor, id, person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove one director link (admin only)
async fn remove_director(
    State(state): State<AppState>,
    Path((id, person_id)): Path<(i64, i64)>,
    Extension(actor): Extension<CurrentUser>,
) -> Result<StatusCode> {
    state.films.remove_director(&actor, id, person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", get(list_films).post(create_film))
        .route(
            "/films/{id}",
            get(get_film)
                .put(update_film)
                .patch(patch_film)
                .delete(delete_film),
        )
        .route("/films/{id}/directors", put(set_directors).get(list_directors))
        .route(
            "/films/{id}/directors/{person_id}",
            put(add_director).delete(remove_director),
        )
}
