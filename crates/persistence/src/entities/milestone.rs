//! Milestone entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::milestone::{Milestone, MilestoneProjectRef};
use sqlx::FromRow;
use uuid::Uuid;

use super::project::ProgressStatusDb;

/// Database row mapping for the milestones table.
#[derive(Debug, Clone, FromRow)]
pub struct MilestoneEntity {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: ProgressStatusDb,
    pub assigned_to: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MilestoneEntity> for Milestone {
    fn from(entity: MilestoneEntity) -> Self {
        Self {
            id: entity.id,
            project_id: entity.project_id,
            name: entity.name,
            description: entity.description,
            due_date: entity.due_date,
            status: entity.status.into(),
            assigned_to: entity.assigned_to,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Milestone row joined with its project's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct MilestoneWithProjectEntity {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_name: String,
    pub project_business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: ProgressStatusDb,
    pub assigned_to: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MilestoneWithProjectEntity {
    /// Reference to the owning project for responses.
    pub fn project_ref(&self) -> MilestoneProjectRef {
        MilestoneProjectRef {
            id: self.project_id,
            project_name: self.project_name.clone(),
            business_id: self.project_business_id,
        }
    }
}
