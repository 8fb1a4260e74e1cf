//! REST API route definitions
//!
//! All catalog routes live under `/api`. Reads are anonymous; mutating verbs
//! (POST/PUT/PATCH/DELETE) require a bearer token with the admin role, which
//! the guard middleware enforces before any handler runs. `/api/login` is
//! mounted outside the guard.

pub mod auth;
pub mod films;
pub mod health;
pub mod pagination;
pub mod people;
pub mod roles;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::error::Error;

/// Extract bearer token from Authorization header
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Guard applied to catalog routes: attaches the caller identity when a
/// valid token is present, and rejects mutating verbs without an admin one.
async fn require_admin_for_writes(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mutating = matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );

    let user = extract_token(request.headers()).map(|token| state.auth.verify(token));

    if mutating {
        let user = match user {
            Some(Ok(user)) => user,
            Some(Err(err)) => return err.into_response(),
            None => return Error::unauthorized().into_response(),
        };
        if let Err(err) = user.require_admin() {
            return err.into_response();
        }
        request.extensions_mut().insert(user);
    } else if let Some(Ok(user)) = user {
        // Reads are anonymous; an invalid token just means no identity
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

pub fn router(state: AppState) -> Router<AppState> {
    let catalog = Router::new()
        .merge(films::router())
        .merge(people::router())
        .merge(roles::router())
        .route_layer(middleware::from_fn_with_state(
            state,
            require_admin_for_writes,
        ));

    Router::new().merge(auth::router()).merge(catalog)
}
