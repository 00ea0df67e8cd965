//! Team membership entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::refs::{RoleRef, TeamRef, UserRef};
use domain::models::team_membership::TeamMembershipResponse;
use sqlx::FromRow;
use uuid::Uuid;

use super::role::RoleScopeDb;

/// Database row mapping for the team_memberships table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMembershipEntity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team membership row joined with all referenced display fields.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMembershipWithRefsEntity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub team_name: String,
    pub user_id: Uuid,
    pub user_full_name: String,
    pub user_email: String,
    pub role_id: Uuid,
    pub role_name: String,
    pub role_scope: RoleScopeDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamMembershipWithRefsEntity> for TeamMembershipResponse {
    fn from(entity: TeamMembershipWithRefsEntity) -> Self {
        Self {
            id: entity.id,
            team: TeamRef {
                id: entity.team_id,
                name: entity.team_name,
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
