//! Role/permission join entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::refs::{PermissionRef, RoleRef};
use domain::models::role_permission::RolePermissionResponse;
use sqlx::FromRow;
use uuid::Uuid;

use super::role::RoleScopeDb;

/// Database row mapping for the role_permissions table.
#[derive(Debug, Clone, FromRow)]
pub struct RolePermissionEntity {
    pub id: Uuid,
    pub role_id: Uuid,
    pub permission_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role/permission row joined with both referenced display fields.
#[derive(Debug, Clone, FromRow)]
pub struct RolePermissionWithRefsEntity {
    pub id: Uuid,
    pub role_id: Uuid,
    pub role_name: String,
    pub role_scope: RoleScopeDb,
    pub permission_id: Uuid,
    pub permission_name: String,
    pub permission_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RolePermissionWithRefsEntity> for RolePermissionResponse {
    fn from(entity: RolePermissionWithRefsEntity) -> Self {
        Self {
            id: entity.id,
            role: RoleRef {
                id: entity.role_id,
                name: entity.role_name,
                scope: entity.role_scope.into(),
            },
            permission: PermissionRef {
                id: entity.permission_id,
                name: entity.permission_name,
                description: entity.permission_description,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
