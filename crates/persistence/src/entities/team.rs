//! Team entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::refs::BusinessRef;
use domain::models::team::{Team, TeamResponse};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the teams table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamEntity> for Team {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            business_id: entity.business_id,
            name: entity.name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Team row joined with its business name.
#[derive(Debug, Clone, FromRow)]
pub struct TeamWithBusinessEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamWithBusinessEntity> for TeamResponse {
    fn from(entity: TeamWithBusinessEntity) -> Self {
        Self {
            id: entity.id,
            business: BusinessRef {
                id: entity.business_id,
                name: entity.business_name,
            },
            name: entity.name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
