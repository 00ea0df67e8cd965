//! Role/permission join models.
//!
//! Identifier fields in request payloads are raw strings so that malformed
//! values can be rejected with a per-field message before any lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::refs::{PermissionRef, RoleRef};

/// Request payload for attaching a permission to a role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePermissionRequest {
    #[validate(length(min = 1, message = "Role ID is required"))]
    pub role_id: String,

    #[validate(length(min = 1, message = "Permission ID is required"))]
    pub permission_id: String,
}

/// Request payload for updating a role/permission pair.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePermissionRequest {
    pub role_id: Option<String>,
    pub permission_id: Option<String>,
}

/// Query parameters for listing role permissions.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListRolePermissionsQuery {
    pub role_id: Option<String>,
    pub permission_id: Option<String>,
}

/// Role/permission pair with both references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionResponse {
    pub id: Uuid,
    pub role: RoleRef,
    pub permission: PermissionRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_role_permission_request_validation() {
        let valid = CreateRolePermissionRequest {
            role_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            permission_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a2".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing = CreateRolePermissionRequest {
            role_id: "".to_string(),
            permission_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a2".to_string(),
        };
        assert!(missing.validate().is_err());
    }
}
