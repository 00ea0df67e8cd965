//! Business membership entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::business_membership::{BusinessMembershipResponse, MembershipStatus};
use domain::models::refs::{BusinessRef, RoleRef, UserRef};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::RoleScopeDb;

/// Database enum mapping for the membership_status type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
pub enum MembershipStatusDb {
    Active,
    Inactive,
    Pending,
}

impl From<MembershipStatusDb> for MembershipStatus {
    fn from(db_status: MembershipStatusDb) -> Self {
        match db_status {
            MembershipStatusDb::Active => MembershipStatus::Active,
            MembershipStatusDb::Inactive => MembershipStatus::Inactive,
            MembershipStatusDb::Pending => MembershipStatus::Pending,
        }
    }
}

impl From<MembershipStatus> for MembershipStatusDb {
    fn from(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Active => MembershipStatusDb::Active,
            MembershipStatus::Inactive => MembershipStatusDb::Inactive,
            MembershipStatus::Pending => MembershipStatusDb::Pending,
        }
    }
}

/// Database row mapping for the business_memberships table.
#[derive(Debug, Clone, FromRow)]
pub struct BusinessMembershipEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub status: MembershipStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Business membership row joined with all referenced display fields.
#[derive(Debug, Clone, FromRow)]
pub struct BusinessMembershipWithRefsEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub user_id: Uuid,
    pub user_full_name: String,
    pub user_email: String,
    pub role_id: Uuid,
    pub role_name: String,
    pub role_scope: RoleScopeDb,
    pub status: MembershipStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessMembershipWithRefsEntity> for BusinessMembershipResponse {
    fn from(entity: BusinessMembershipWithRefsEntity) -> Self {
        Self {
            id: entity.id,
            business: BusinessRef {
                id: entity.business_id,
                name: entity.business_name,
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
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_status_db_conversion() {
        assert_eq!(
            MembershipStatus::from(MembershipStatusDb::Pending),
            MembershipStatus::Pending
        );
        assert_eq!(
            MembershipStatusDb::from(MembershipStatus::Active),
            MembershipStatusDb::Active
        );
    }
}
