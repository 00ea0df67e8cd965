//! User domain models and authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Coarse global role attached to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalRole {
    User,
    Admin,
}

impl GlobalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalRole::User => "user",
            GlobalRole::Admin => "admin",
        }
    }

    /// Returns true if this role may manage platform-level resources
    /// (create businesses, assign global roles).
    pub fn is_admin(&self) -> bool {
        matches!(self, GlobalRole::Admin)
    }
}

impl FromStr for GlobalRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(GlobalRole::User),
            "admin" => Ok(GlobalRole::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: GlobalRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for account registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub password: String,
}

/// Request payload for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request payload for requesting a password-reset code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request payload for verifying a password-reset code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

/// Request payload for resetting a password.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub password: String,
}

/// Request payload for the admin set-role operation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub role: GlobalRole,
}

/// Public user info returned by authentication endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: GlobalRole,
}

/// Response body for signup and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_role_as_str() {
        assert_eq!(GlobalRole::User.as_str(), "user");
        assert_eq!(GlobalRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_global_role_from_str() {
        assert_eq!(GlobalRole::from_str("user").unwrap(), GlobalRole::User);
        assert_eq!(GlobalRole::from_str("ADMIN").unwrap(), GlobalRole::Admin);
        assert!(GlobalRole::from_str("superuser").is_err());
    }

    #[test]
    fn test_global_role_is_admin() {
        assert!(GlobalRole::Admin.is_admin());
        assert!(!GlobalRole::User.is_admin());
    }

    #[test]
    fn test_global_role_serialization() {
        assert_eq!(serde_json::to_string(&GlobalRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&GlobalRole::Admin).unwrap(),
            "\"admin\""
        );
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            password: "password1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignupRequest {
            full_name: "Jane Smith".to_string(),
            email: "not-an-email".to_string(),
            password: "password1".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let weak_password = SignupRequest {
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(weak_password.validate().is_err());
    }

    #[test]
    fn test_verify_otp_request_validation() {
        let valid = VerifyOtpRequest {
            email: "jane@example.com".to_string(),
            otp: "123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short = VerifyOtpRequest {
            email: "jane@example.com".to_string(),
            otp: "123".to_string(),
        };
        assert!(short.validate().is_err());
    }
}
