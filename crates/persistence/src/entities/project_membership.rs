//! Project membership entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::project_membership::ProjectMembershipResponse;
use domain::models::refs::{ProjectRef, RoleRef, UserRef};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::RoleScopeDb;

/// Database row mapping for the project_memberships table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectMembershipEntity {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project membership row joined with all referenced display fields.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectMembershipWithRefsEntity {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_name: String,
    pub user_id: Uuid,
    pub user_full_name: String,
    pub user_email: String,
    pub role_id: Uuid,
    pub role_name: String,
    pub role_scope: RoleScopeDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectMembershipWithRefsEntity> for ProjectMembershipResponse {
    fn from(entity: ProjectMembershipWithRefsEntity) -> Self {
        Self {
            id: entity.id,
            project: ProjectRef {
                id: entity.project_id,
                project_name: entity.project_name,
            },
            user: UserRef {
                id: entity.user_id,
                full_name: entity.user_full_name,
                email: entity.user_email,
            },
            role: RoleRef {
                id: entity.role_id,
                name: entity.role_name,
                scope: entity.role_scope.into(),
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
