//! Authentication service: login, JWT issue/verify, password hashing
//!
//! The service is stateless: login issues a signed HS256 access token and
//! every later request authenticates by presenting it as a bearer token.
//! There is no session or refresh-token state to revoke.

use anyhow::anyhow;
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::db::{CreateUser, Database};
use crate::error::{Error, Result};

/// Role required for mutating operations
pub const ROLE_ADMIN: &str = "admin";

/// Claims structure for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID (subject)
    pub sub: String,
    /// Username
    pub username: String,
    /// User role (admin, user)
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Authenticated caller, extracted from a verified token.
///
/// Inserted into request extensions by the REST middleware and into the
/// GraphQL context by the handler; services check it at their boundary.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Require the admin role, the check behind every mutating service call
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Forbidden)
        }
    }
}

/// Token issued after successful login
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_lifetime: i64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_lifetime: config.token_lifetime,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

/// Issue an access token for a user
pub fn issue_token(config: &AuthConfig, user_id: i64, username: &str, role: &str) -> Result<IssuedToken> {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: (now + Duration::seconds(config.token_lifetime)).timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(anyhow!("Failed to sign token: {}", e)))?;

    Ok(IssuedToken {
        token,
        token_type: "Bearer".to_string(),
        expires_in: config.token_lifetime,
    })
}

/// Verify an access token and extract the caller identity
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<CurrentUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| Error::Unauthorized(format!("Invalid token: {}", e)))?;

    let id = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| Error::Unauthorized("Invalid token subject".to_string()))?;

    Ok(CurrentUser {
        id,
        username: token_data.claims.username,
        role: token_data.claims.role,
    })
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Login with username and password, issuing an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<(CurrentUser, IssuedToken)> {
        let user = self
            .db
            .users()
            .get_by_username(username)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid username or password".to_string()))?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(Error::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = issue_token(&self.config, user.id, &user.username, &user.role)?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok((
            CurrentUser {
                id: user.id,
                username: user.username,
                role: user.role,
            },
            token,
        ))
    }

    /// Verify an access token against this service's secret
    pub fn verify(&self, token: &str) -> Result<CurrentUser> {
        verify_token(&self.config, token)
    }

    /// Seed the default admin/user accounts on an empty users table.
    ///
    /// Mirrors a development user store: admin/password with the admin role,
    /// user/password without it. Production deployments are expected to
    /// replace these immediately.
    pub async fn ensure_seed_users(&self) -> Result<()> {
        let users = self.db.users();

        if users.count().await? > 0 {
            return Ok(());
        }

        tracing::warn!("Users table is empty, seeding default admin and user accounts");

        users
            .create(CreateUser {
                username: "admin".to_string(),
                password_hash: self.hash_password("password")?,
                role: ROLE_ADMIN.to_string(),
            })
            .await?;

        users
            .create(CreateUser {
                username: "user".to_string(),
                password_hash: self.hash_password("password")?,
                role: "user".to_string(),
            })
            .await?;

        Ok(())
    }

    /// Hash a password with bcrypt
    fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| Error::Internal(anyhow!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a hash
    fn verify_password(&self, password: &str, hashed: &str) -> Result<bool> {
        verify(password, hashed)
            .map_err(|e| Error::Internal(anyhow!("Failed to verify password: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_lifetime: 3600,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn issued_token_verifies_back_to_caller() {
        let config = test_config();
        let issued = issue_token(&config, 7, "admin", ROLE_ADMIN).unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 3600);

        let user = verify_token(&config, &issued.token).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "admin");
        assert!(user.is_admin());
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let issued = issue_token(&test_config(), 1, "admin", ROLE_ADMIN).unwrap();

        let other = AuthConfig {
            jwt_secret: "different-secret".to_string(),
            ..test_config()
        };
        assert_matches!(
            verify_token(&other, &issued.token),
            Err(Error::Unauthorized(_))
        );
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_matches!(
            verify_token(&test_config(), "not-a-jwt"),
            Err(Error::Unauthorized(_))
        );
    }

    #[test]
    fn non_admin_caller_fails_admin_check() {
        let user = CurrentUser {
            id: 2,
            username: "user".to_string(),
            role: "user".to_string(),
        };
        assert!(!user.is_admin());
        assert_matches!(user.require_admin(), Err(Error::Forbidden));

        let admin = CurrentUser {
            id: 1,
            username: "admin".to_string(),
            role: ROLE_ADMIN.to_string(),
        };
        assert!(admin.require_admin().is_ok());
    }
}
