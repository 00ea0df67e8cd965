//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::refs::UserRef;
use domain::models::user::{GlobalRole, User, UserProfile};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the user_role type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRoleDb {
    User,
    Admin,
}

impl From<UserRoleDb> for GlobalRole {
    fn from(db_role: UserRoleDb) -> Self {
        match db_role {
            UserRoleDb::User => GlobalRole::User,
            UserRoleDb::Admin => GlobalRole::Admin,
        }
    }
}

impl From<GlobalRole> for UserRoleDb {
    fn from(role: GlobalRole) -> Self {
        match role {
            GlobalRole::User => UserRoleDb::User,
            GlobalRole::Admin => UserRoleDb::Admin,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRoleDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&UserEntity> for UserProfile {
    fn from(entity: &UserEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name.clone(),
            email: entity.email.clone(),
            role: entity.role.into(),
        }
    }
}

impl From<&UserEntity> for UserRef {
    fn from(entity: &UserEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name.clone(),
            email: entity.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_db_conversion() {
        assert_eq!(GlobalRole::from(UserRoleDb::User), GlobalRole::User);
        assert_eq!(GlobalRole::from(UserRoleDb::Admin), GlobalRole::Admin);
        assert_eq!(UserRoleDb::from(GlobalRole::Admin), UserRoleDb::Admin);
    }
}
