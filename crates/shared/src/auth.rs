//! Authentication types for JWT and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::UserId;
use crate::validation::non_blank;

/// User roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Submits expenses.
    #[default]
    Employee,
    /// Reviews expenses for a department.
    Manager,
    /// Full access.
    Admin,
}

impl UserRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: UserId,
    /// Login name.
    pub username: String,
    /// User's role.
    pub role: UserRole,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: UserId, username: &str, role: UserRole, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(custom(function = "non_blank", message = "Username or email is required"))]
    pub username: String,
    /// User password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup request payload.
///
/// Column widths of the `users` table bound the free-text fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignupRequest {
    /// User full name.
    #[validate(
        custom(function = "non_blank", message = "Full name is required"),
        length(max = 255, message = "Full name must be at most 255 characters")
    )]
    pub full_name: String,
    /// User email.
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    /// Login name.
    #[validate(length(
        min = 3,
        max = 100,
        message = "Username must be between 3 and 100 characters"
    ))]
    pub username: String,
    /// User password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Employee identifier.
    #[validate(
        custom(function = "non_blank", message = "Employee ID is required"),
        length(max = 50, message = "Employee ID must be at most 50 characters")
    )]
    pub employee_id: String,
    /// Department name.
    #[validate(
        custom(function = "non_blank", message = "Department is required"),
        length(max = 100, message = "Department must be at most 100 characters")
    )]
    pub department: String,
    /// Requested role, `employee` when omitted.
    #[serde(default)]
    pub role: UserRole,
}

impl SignupRequest {
    /// Trims every text field and lowercases the email.
    ///
    /// Run this before `validate` so length rules see the stored values.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            username: self.username.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            department: self.department.trim().to_string(),
            ..self
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// User email.
    pub email: String,
    /// User full name.
    pub full_name: String,
    /// User role.
    pub role: UserRole,
    /// Department name.
    pub department: String,
    /// Employee identifier.
    pub employee_id: String,
}

/// Response for a successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Human readable outcome.
    pub message: String,
    /// Session token.
    pub token: String,
    /// Authenticated user.
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;
    use serde_json::json;

    fn valid_signup() -> serde_json::Value {
        json!({
            "fullName": "Barath Kumar",
            "email": "barath@tracker.com",
            "username": "barath",
            "password": "123456",
            "employeeId": "EMP001",
            "department": "Sales"
        })
    }

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = UserId::new();
        let expires_at = Utc::now() + Duration::hours(24);

        let claims = Claims::new(user_id, "admin", UserRole::Admin, expires_at);

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[rstest]
    #[case(json!("employee"), UserRole::Employee)]
    #[case(json!("manager"), UserRole::Manager)]
    #[case(json!("admin"), UserRole::Admin)]
    fn test_role_deserializes_lowercase(
        #[case] input: serde_json::Value,
        #[case] expected: UserRole,
    ) {
        assert_eq!(serde_json::from_value::<UserRole>(input).unwrap(), expected);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(json!(UserRole::Manager), json!("manager"));
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_signup_defaults_role_to_employee() {
        let request: SignupRequest = serde_json::from_value(valid_signup()).unwrap();
        assert_eq!(request.role, UserRole::Employee);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_signup_rejects_unknown_fields() {
        let mut body = valid_signup();
        body["isAdmin"] = json!(true);
        assert!(serde_json::from_value::<SignupRequest>(body).is_err());
    }

    #[test]
    fn test_signup_rejects_unknown_role() {
        let mut body = valid_signup();
        body["role"] = json!("owner");
        assert!(serde_json::from_value::<SignupRequest>(body).is_err());
    }

    #[rstest]
    #[case("email", json!("not-an-email"))]
    #[case("username", json!("ab"))]
    #[case("password", json!("12345"))]
    #[case("fullName", json!("   "))]
    #[case("employeeId", json!(""))]
    #[case("department", json!(""))]
    #[case("username", json!("u".repeat(101)))]
    #[case("fullName", json!("n".repeat(256)))]
    #[case("employeeId", json!("E".repeat(51)))]
    #[case("department", json!("d".repeat(101)))]
    #[case("email", json!(format!("{}@tracker.com", "e".repeat(250))))]
    fn test_signup_field_rules(#[case] field: &str, #[case] value: serde_json::Value) {
        let mut body = valid_signup();
        body[field] = value;
        let request: SignupRequest = serde_json::from_value(body).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_normalized_trims_before_length_rules() {
        let mut body = valid_signup();
        body["username"] = json!("  ab  ");
        let request: SignupRequest = serde_json::from_value(body).unwrap();
        let errors = request.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_signup_normalized_cleans_fields() {
        let mut body = valid_signup();
        body["email"] = json!("  Barath@Tracker.com ");
        body["username"] = json!(" barath ");
        body["department"] = json!(" Sales ");
        let request: SignupRequest = serde_json::from_value(body).unwrap();
        let request = request.normalized();

        assert!(request.validate().is_ok());
        assert_eq!(request.email, "barath@tracker.com");
        assert_eq!(request.username, "barath");
        assert_eq!(request.department, "Sales");
        assert_eq!(request.password, "123456");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let request: LoginRequest =
            serde_json::from_value(json!({"username": " ", "password": ""})).unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }
}
