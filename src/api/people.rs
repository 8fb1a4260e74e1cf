//! People REST endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::api::pagination::{Page, PageParams};
use crate::db::sort::PERSON_SORT_FIELDS;
use crate::db::{PersonInput, PersonPatch, PersonRecord};
use crate::error::{Error, Result};
use crate::services::CurrentUser;

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

impl From<PersonRecord> for PersonResponse {
    fn from(record: PersonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            date_of_birth: record.date_of_birth,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonRequest {
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

impl From<PersonRequest> for PersonInput {
    fn from(request: PersonRequest) -> Self {
        Self {
            name: request.name,
            date_of_birth: request.date_of_birth,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PatchPersonRequest {
    pub name: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

impl From<PatchPersonRequest> for PersonPatch {
    fn from(request: PatchPersonRequest) -> Self {
        Self {
            name: request.name,
            date_of_birth: request.date_of_birth,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonListParams {
    #[serde(flatten)]
    pub page: PageParams,
    /// Optional name substring filter
    pub name: Option<String>,
}

/// List people with paging, sorting, and optional name filter
async fn list_people(
    State(state): State<AppState>,
    Query(params): Query<PersonListParams>,
) -> Result<Json<Page<PersonResponse>>> {
    let request = params.page.resolve(PERSON_SORT_FIELDS)?;
    let (records, total) = state
        .people
        .list(
            request.offset,
            request.size,
            params.name.as_deref(),
            request.sort,
        )
        .await?;

    let items = records.into_iter().map(PersonResponse::from).collect();
    Ok(Json(Page::new(items, &request, total)))
}

/// Get a person by id
async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PersonResponse>> {
    let record = state
        .people
        .get(id)
        .await?
        .ok_or_else(|| Error::person_not_found(id))?;

    Ok(Json(record.into()))
}

/// Create a person (admin only)
async fn create_person(
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<PersonRequest>,
) -> Result<(StatusCode, Json<PersonResponse>)> {
    let record = state.people.create(&actor, request.into()).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Replace a person (admin only)
async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<PersonRequest>,
) -> Result<Json<PersonResponse>> {
    let record = state.people.update(&actor, id, request.into()).await?;
    Ok(Json(record.into()))
}

/// Partially update a person (admin only)
async fn patch_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<PatchPersonRequest>,
) -> Result<Json<PersonResponse>> {
    let record = state.people.patch(&actor, id, request.into()).await?;
    Ok(Json(record.into()))
}

/// Delete a person and their relationship rows (admin only)
async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
) -> Result<StatusCode> {
    state.people.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/people", get(list_people).post(create_person))
        .route(
            "/people/{id}",
            get(get_person)
                .put(update_person)
                .patch(patch_person)
                .delete(delete_person),
        )
}
