//! Business entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::business::{Business, BusinessResponse, BusinessType};
use domain::models::refs::UserRef;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the business_type type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "business_type", rename_all = "snake_case")]
pub enum BusinessTypeDb {
    Factory,
    Shop,
    DairyFarm,
    School,
    DataEngineer,
    Other,
}

impl From<BusinessTypeDb> for BusinessType {
    fn from(db_type: BusinessTypeDb) -> Self {
        match db_type {
            BusinessTypeDb::Factory => BusinessType::Factory,
            BusinessTypeDb::Shop => BusinessType::Shop,
            BusinessTypeDb::DairyFarm => BusinessType::DairyFarm,
            BusinessTypeDb::School => BusinessType::School,
            BusinessTypeDb::DataEngineer => BusinessType::DataEngineer,
            BusinessTypeDb::Other => BusinessType::Other,
        }
    }
}

impl From<BusinessType> for BusinessTypeDb {
    fn from(ty: BusinessType) -> Self {
        match ty {
            BusinessType::Factory => BusinessTypeDb::Factory,
            BusinessType::Shop => BusinessTypeDb::Shop,
            BusinessType::DairyFarm => BusinessTypeDb::DairyFarm,
            BusinessType::School => BusinessTypeDb::School,
            BusinessType::DataEngineer => BusinessTypeDb::DataEngineer,
            BusinessType::Other => BusinessTypeDb::Other,
        }
    }
}

/// Database row mapping for the businesses table.
#[derive(Debug, Clone, FromRow)]
pub struct BusinessEntity {
    pub id: Uuid,
    pub name: String,
    pub business_type: BusinessTypeDb,
    pub description: Option<String>,
    pub image: Option<String>,
    pub super_admin_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessEntity> for Business {
    fn from(entity: BusinessEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            business_type: entity.business_type.into(),
            description: entity.description,
            image: entity.image,
            super_admin_user_id: entity.super_admin_user_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Business row joined with its owner's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct BusinessWithOwnerEntity {
    pub id: Uuid,
    pub name: String,
    pub business_type: BusinessTypeDb,
    pub description: Option<String>,
    pub image: Option<String>,
    pub super_admin_user_id: Uuid,
    pub owner_full_name: String,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessWithOwnerEntity> for BusinessResponse {
    fn from(entity: BusinessWithOwnerEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            business_type: entity.business_type.into(),
            description: entity.description,
            image: entity.image,
            super_admin_user: UserRef {
                id: entity.super_admin_user_id,
                full_name: entity.owner_full_name,
                email: entity.owner_email,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_type_db_round_trip() {
        for ty in BusinessType::all() {
            let db: BusinessTypeDb = (*ty).into();
            assert_eq!(BusinessType::from(db), *ty);
        }
    }
}
