//! Role catalog models.
//!
//! Roles are named per scope (business, team or project) and are referenced
//! by membership rows. The (name, scope) pair is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// The container type a role applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleScope {
    Business,
    Team,
    Project,
}

impl RoleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleScope::Business => "business",
            RoleScope::Team => "team",
            RoleScope::Project => "project",
        }
    }
}

impl FromStr for RoleScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "business" => Ok(RoleScope::Business),
            "team" => Ok(RoleScope::Team),
            "project" => Ok(RoleScope::Project),
            _ => Err(format!("Invalid scope: {}", s)),
        }
    }
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named role within a scope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub scope: RoleScope,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: String,

    pub scope: RoleScope,
}

/// Request payload for updating a role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: Option<String>,

    pub scope: Option<RoleScope>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_scope_as_str() {
        assert_eq!(RoleScope::Business.as_str(), "business");
        assert_eq!(RoleScope::Team.as_str(), "team");
        assert_eq!(RoleScope::Project.as_str(), "project");
    }

    #[test]
    fn test_role_scope_from_str() {
        assert_eq!(RoleScope::from_str("business").unwrap(), RoleScope::Business);
        assert_eq!(RoleScope::from_str("TEAM").unwrap(), RoleScope::Team);
        assert!(RoleScope::from_str("global").is_err());
    }

    #[test]
    fn test_role_scope_serialization() {
        assert_eq!(
            serde_json::to_string(&RoleScope::Project).unwrap(),
            "\"project\""
        );
    }

    #[test]
    fn test_create_role_request_validation() {
        let valid = CreateRoleRequest {
            name: "Manager".to_string(),
            scope: RoleScope::Business,
        };
        assert!(valid.validate().is_ok());

        let empty = CreateRoleRequest {
            name: "".to_string(),
            scope: RoleScope::Team,
        };
        assert!(empty.validate().is_err());
    }
}
