//! Compact reference DTOs used to expand foreign keys in responses.
//!
//! Mutation and list responses return referenced entities as nested objects
//! carrying their display fields instead of bare identifiers.

use serde::Serialize;
use uuid::Uuid;

/// Business reference (display fields only).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRef {
    pub id: Uuid,
    pub name: String,
}

/// Team reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Uuid,
    pub name: String,
}

/// User reference (no sensitive data).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

/// Role reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub id: Uuid,
    pub name: String,
    pub scope: super::role::RoleScope,
}

/// Permission reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRef {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Project reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub id: Uuid,
    pub project_name: String,
}
