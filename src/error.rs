//! Domain error type shared by the service, REST, and GraphQL layers

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Input failed validation before reaching the store
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed to perform the operation
    #[error("Admin role required")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Not-found error for a film id, e.g. "Film with id 5 not found"
    pub fn film_not_found(id: i64) -> Self {
        Error::NotFound(format!("Film with id {} not found", id))
    }

    /// Not-found error for a person id
    pub fn person_not_found(id: i64) -> Self {
        Error::NotFound(format!("Person with id {} not found", id))
    }

    /// Not-found error for a role composite key
    pub fn role_not_found(film_id: i64, person_id: i64) -> Self {
        Error::NotFound(format!(
            "Role with film id {} and person id {} not found",
            film_id, person_id
        ))
    }

    /// Unauthorized with the default message
    pub fn unauthorized() -> Self {
        Error::Unauthorized("Authentication required".to_string())
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// GraphQL error extension code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::Validation(_) => "BAD_REQUEST",
            Error::Unauthorized(_) => "UNAUTHORIZED",
            Error::Forbidden => "FORBIDDEN",
            Error::Database(_) | Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak database details to the client
        let message = match &self {
            Error::Database(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "Internal error while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// A plain `From` impl would collide with async-graphql's blanket Display
// conversion, which also strips extensions. Resolvers convert through
// `ResultExt::extend` so every GraphQL error carries its code.
impl async_graphql::ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        use async_graphql::ErrorExtensions;

        let message = match self {
            Error::Database(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "Internal error while resolving GraphQL request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", self.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_entity_and_id() {
        assert_eq!(
            Error::film_not_found(5).to_string(),
            "Film with id 5 not found"
        );
        assert_eq!(
            Error::person_not_found(42).to_string(),
            "Person with id 42 not found"
        );
        assert_eq!(
            Error::role_not_found(1, 2).to_string(),
            "Role with film id 1 and person id 2 not found"
        );
    }

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(Error::film_not_found(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::Forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn graphql_codes_match_error_kinds() {
        assert_eq!(Error::film_not_found(1).code(), "NOT_FOUND");
        assert_eq!(Error::Validation("bad".into()).code(), "BAD_REQUEST");
        assert_eq!(Error::unauthorized().code(), "UNAUTHORIZED");
        assert_eq!(Error::Forbidden.code(), "FORBIDDEN");
    }

    #[test]
    fn extended_graphql_error_carries_code_extension() {
        use async_graphql::ErrorExtensions;

        let err = Error::film_not_found(5).extend();
        assert_eq!(err.message, "Film with id 5 not found");
        let extensions = err.extensions.expect("code extension must be set");
        assert!(format!("{:?}", extensions).contains("NOT_FOUND"));

        let err = Error::Forbidden.extend();
        let extensions = err.extensions.expect("code extension must be set");
        assert!(format!("{:?}", extensions).contains("FORBIDDEN"));
    }

    #[test]
    fn extended_internal_error_is_masked() {
        use async_graphql::ErrorExtensions;

        let err = Error::Internal(anyhow::anyhow!("secret detail")).extend();
        assert_eq!(err.message, "Internal server error");
    }
}
