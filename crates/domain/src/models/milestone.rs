//! Milestone domain models.
//!
//! Milestones are task-like records scoped to a project. Every assignee
//! must hold a membership in that project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::project::ProgressStatus;
use super::refs::UserRef;

/// A milestone within a project.
#[derive(Debug, Clone)]
pub struct Milestone {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: ProgressStatus,
    pub assigned_to: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a milestone.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestoneRequest {
    #[validate(length(min = 1, message = "Project ID is required"))]
    pub project_id: String,

    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub due_date: Option<DateTime<Utc>>,

    pub status: Option<ProgressStatus>,

    /// User IDs to assign; each must be a member of the project.
    pub assigned_to: Option<Vec<String>>,
}

/// Request payload for updating a milestone.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<ProgressStatus>,
    pub assigned_to: Option<Vec<String>>,
}

/// Query parameters for listing milestones.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListMilestonesQuery {
    pub project_id: Option<String>,
}

/// Project reference carried on milestone responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProjectRef {
    pub id: Uuid,
    pub project_name: String,
    pub business_id: Uuid,
}

/// Milestone representation with references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneResponse {
    pub id: Uuid,
    pub project: MilestoneProjectRef,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: ProgressStatus,
    pub assigned_to: Vec<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_milestone_request_validation() {
        let valid = CreateMilestoneRequest {
            project_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            name: "Beta launch".to_string(),
            description: None,
            due_date: None,
            status: None,
            assigned_to: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateMilestoneRequest {
            project_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            name: " ".to_string(),
            description: None,
            due_date: None,
            status: None,
            assigned_to: None,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_update_request_defaults_to_no_changes() {
        let update = UpdateMilestoneRequest::default();
        assert!(update.name.is_none());
        assert!(update.assigned_to.is_none());
    }
}
