//! Role entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::role::{Role, RoleScope};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the role_scope type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "role_scope", rename_all = "lowercase")]
pub enum RoleScopeDb {
    Business,
    Team,
    Project,
}

impl From<RoleScopeDb> for RoleScope {
    fn from(db_scope: RoleScopeDb) -> Self {
        match db_scope {
            RoleScopeDb::Business => RoleScope::Business,
            RoleScopeDb::Team => RoleScope::Team,
            RoleScopeDb::Project => RoleScope::Project,
        }
    }
}

impl From<RoleScope> for RoleScopeDb {
    fn from(scope: RoleScope) -> Self {
        match scope {
            RoleScope::Business => RoleScopeDb::Business,
            RoleScope::Team => RoleScopeDb::Team,
            RoleScope::Project => RoleScopeDb::Project,
        }
    }
}

/// Database row mapping for the roles table.
#[derive(Debug, Clone, FromRow)]
pub struct RoleEntity {
    pub id: Uuid,
    pub name: String,
    pub scope: RoleScopeDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoleEntity> for Role {
    fn from(entity: RoleEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            scope: entity.scope.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_scope_db_conversion() {
        assert_eq!(RoleScope::from(RoleScopeDb::Team), RoleScope::Team);
        assert_eq!(RoleScopeDb::from(RoleScope::Project), RoleScopeDb::Project);
    }
}
