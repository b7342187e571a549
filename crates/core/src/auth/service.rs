//! Login, signup and session token verification.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use tracker_shared::auth::{AuthResponse, Claims, LoginRequest, SignupRequest};
use tracker_shared::jwt::{JwtError, JwtService};
use tracker_shared::types::UserId;
use tracker_shared::validation::describe_errors;
use validator::Validate;

use super::error::AuthError;
use super::password::{PasswordError, hash_password, verify_password};
use super::types::User;
use crate::store::UserStore;

/// Authenticates users and issues session tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtService,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    /// Authenticates by username or email and issues a token.
    ///
    /// Unknown users, inactive accounts and wrong passwords are all reported
    /// as `InvalidCredentials`.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::Validation(describe_errors(&e)))?;

        let identifier = request.username.trim();
        let user = match self.users.find_by_username(identifier).await? {
            Some(user) => Some(user),
            None => {
                self.users
                    .find_by_email(&identifier.to_lowercase())
                    .await?
            }
        };

        let Some(user) = user else {
            info!(username = %identifier, "Login attempt for non-existent user");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            info!(user_id = %user.id, "Login attempt for inactive user");
            return Err(AuthError::InvalidCredentials);
        }

        match verify_password(&request.password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                info!(user_id = %user.id, "Failed login attempt - invalid password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(PasswordError::UnrecognizedHash) => {
                warn!(user_id = %user.id, "Stored password is not an argon2 hash");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::Internal(e.to_string())),
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: user.profile(),
        })
    }

    /// Registers a new account and issues a token.
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, AuthError> {
        let request = request.normalized();
        request
            .validate()
            .map_err(|e| AuthError::Validation(describe_errors(&e)))?;

        let SignupRequest {
            full_name,
            email,
            username,
            password,
            employee_id,
            department,
            role,
        } = request;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AuthError::DuplicateField("username".to_string()));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateField("email".to_string()));
        }
        if self.users.find_by_employee_id(&employee_id).await?.is_some() {
            return Err(AuthError::DuplicateField("employeeId".to_string()));
        }

        let password_hash =
            hash_password(&password).map_err(|e| AuthError::Internal(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            full_name,
            employee_id,
            department,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        // A concurrent signup can still win the race; the store reports it
        // as a duplicate.
        self.users.insert(&user).await?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(AuthResponse {
            message: "Account created successfully".to_string(),
            token,
            user: user.profile(),
        })
    }

    /// Validates a presented bearer token.
    pub fn verify(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.jwt.validate_token(token).map_err(|e| {
            match &e {
                JwtError::Expired => info!("Rejected expired token"),
                _ => info!(error = %e, "Rejected invalid token"),
            }
            AuthError::InvalidToken
        })
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.jwt
            .generate_token(user.id, &user.username, user.role)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("jwt", &self.jwt)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
