//! Project entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::project::{ProgressStatus, Project, ProjectResponse};
use domain::models::refs::{BusinessRef, TeamRef};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the progress_status type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "progress_status", rename_all = "snake_case")]
pub enum ProgressStatusDb {
    Pending,
    InProgress,
    Completed,
}

impl From<ProgressStatusDb> for ProgressStatus {
    fn from(db_status: ProgressStatusDb) -> Self {
        match db_status {
            ProgressStatusDb::Pending => ProgressStatus::Pending,
            ProgressStatusDb::InProgress => ProgressStatus::InProgress,
            ProgressStatusDb::Completed => ProgressStatus::Completed,
        }
    }
}

impl From<ProgressStatus> for ProgressStatusDb {
    fn from(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::Pending => ProgressStatusDb::Pending,
            ProgressStatus::InProgress => ProgressStatusDb::InProgress,
            ProgressStatus::Completed => ProgressStatusDb::Completed,
        }
    }
}

/// Database row mapping for the projects table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub team_id: Uuid,
    pub project_name: String,
    pub description: Option<String>,
    pub status: ProgressStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectEntity> for Project {
    fn from(entity: ProjectEntity) -> Self {
        Self {
            id: entity.id,
            business_id: entity.business_id,
            team_id: entity.team_id,
            project_name: entity.project_name,
            description: entity.description,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Project row joined with business and team names.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectWithRefsEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub project_name: String,
    pub description: Option<String>,
    pub status: ProgressStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectWithRefsEntity> for ProjectResponse {
    fn from(entity: ProjectWithRefsEntity) -> Self {
        Self {
            id: entity.id,
            business: BusinessRef {
                id: entity.business_id,
                name: entity.business_name,
            },
            team: TeamRef {
                id: entity.team_id,
                name: entity.team_name,
            },
            project_name: entity.project_name,
            description: entity.description,
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
    fn test_progress_status_db_conversion() {
        assert_eq!(
            ProgressStatus::from(ProgressStatusDb::InProgress),
            ProgressStatus::InProgress
        );
        assert_eq!(
            ProgressStatusDb::from(ProgressStatus::Completed),
            ProgressStatusDb::Completed
        );
    }
}
