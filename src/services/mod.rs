//! Service layer: orchestrates repositories, enforces authorization and
//! validation at the boundary between transport and storage.

pub mod auth;
pub mod films;
pub mod people;
pub mod roles;

pub use auth::{AuthConfig, AuthService, CurrentUser, IssuedToken, ROLE_ADMIN};
pub use films::FilmService;
pub use people::PersonService;
pub use roles::RoleService;

use crate::error::{Error, Result};

const MAX_NAME_LENGTH: usize = 255;

fn validate_required(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", what)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "{} length must be between 1 and {} characters",
            what, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validate a person name: required, 1-255 characters
pub fn validate_name(name: &str) -> Result<()> {
    validate_required(name, "Name")
}

/// Validate a film title: required, 1-255 characters
pub fn validate_title(title: &str) -> Result<()> {
    validate_required(title, "Title")
}

/// Validate a role character name: required, 1-255 characters
pub fn validate_character(character: &str) -> Result<()> {
    validate_required(character, "Character")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_name_is_rejected() {
        assert_matches!(validate_name(""), Err(Error::Validation(_)));
        assert_matches!(validate_name("   "), Err(Error::Validation(_)));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "x".repeat(256);
        assert_matches!(validate_name(&name), Err(Error::Validation(_)));
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        assert!(validate_name("x").is_ok());
        assert!(validate_name(&"x".repeat(255)).is_ok());
        assert!(validate_title("Alien").is_ok());
        assert!(validate_character("Ellen Ripley").is_ok());
    }
}
