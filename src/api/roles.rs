//! Cast (role) REST endpoints, nested under films

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::db::RoleRecord;
use crate::error::{Error, Result};
use crate::services::CurrentUser;

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub film_id: i64,
    pub person_id: i64,
    pub character: String,
}

impl From<RoleRecord> for RoleResponse {
    fn from(record: RoleRecord) -> Self {
        Self {
            film_id: record.film_id,
            person_id: record.person_id,
            character: record.character,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub person_id: i64,
    pub character: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub character: String,
}

/// List the cast of a film
async fn list_cast(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> Result<Json<Vec<RoleResponse>>> {
    if !state.films.exists(film_id).await? {
        return Err(Error::film_not_found(film_id));
    }

    let roles = state.roles.cast(film_id).await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

/// Cast a person in a film (admin only)
async fn create_role(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>)> {
    let record = state
        .roles
        .create(&actor, film_id, request.person_id, &request.character)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Get one casting assignment
async fn get_role(
    State(state): State<AppState>,
    Path((film_id, person_id)): Path<(i64, i64)>,
) -> Result<Json<RoleResponse>> {
    let record = state
        .roles
        .get(film_id, person_id)
        .await?
        .ok_or_else(|| Error::role_not_found(film_id, person_id))?;

    Ok(Json(record.into()))
}

/// Update the character of a casting assignment (admin only)
async fn update_role(
    State(state): State<AppState>,
    Path((film_id, person_id)): Path<(i64, i64)>,
    Extension(actor): Extension<CurrentUser>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<RoleResponse>> {
    let record = state
        .roles
        .update(&actor, film_id, person_id, &request.character)
        .await?;

    Ok(Json(record.into()))
}

/// Remove a casting assignment (admin only)
async fn delete_role(
    State(state): State<AppState>,
    Path((film_id, person_id)): Path<(i64, i64)>,
    Extension(actor): Extension<CurrentUser>,
) -> Result<StatusCode> {
    state.roles.delete(&actor, film_id, person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films/{id}/cast", get(list_cast).post(create_role))
        .route(
            "/films/{id}/cast/{person_id}",
            get(get_role).put(update_role).delete(delete_role),
        )
}
