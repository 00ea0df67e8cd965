//! Permission entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::permission::Permission;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the permissions table.
#[derive(Debug, Clone, FromRow)]
pub struct PermissionEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PermissionEntity> for Permission {
    fn from(entity: PermissionEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
