//! Project domain models.
//!
//! A project belongs to a business and to one of that business's teams;
//! the referenced team must belong to the referenced business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::refs::{BusinessRef, TeamRef};

/// Progress state shared by projects and milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Pending,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Pending => "pending",
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
        }
    }
}

impl FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProgressStatus::Pending),
            "in_progress" => Ok(ProgressStatus::InProgress),
            "completed" => Ok(ProgressStatus::Completed),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A project within a business, carried by a team.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub business_id: Uuid,
    pub team_id: Uuid,
    pub project_name: String,
    pub description: Option<String>,
    pub status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Business ID is required"))]
    pub business_id: String,

    #[validate(length(min = 1, message = "Team ID is required"))]
    pub team_id: String,

    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub project_name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub status: Option<ProgressStatus>,
}

/// Request payload for updating a project.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub business_id: Option<String>,
    pub team_id: Option<String>,
    pub project_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProgressStatus>,
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    pub business_id: Option<String>,
    pub team_id: Option<String>,
    pub status: Option<String>,
}

/// Project representation with references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub business: BusinessRef,
    pub team: TeamRef,
    pub project_name: String,
    pub description: Option<String>,
    pub status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_status_round_trip() {
        for s in ["pending", "in_progress", "completed"] {
            assert_eq!(ProgressStatus::from_str(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_progress_status_rejects_unknown() {
        assert!(ProgressStatus::from_str("done").is_err());
        assert!(ProgressStatus::from_str("In_Progress").is_err());
    }

    #[test]
    fn test_progress_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ProgressStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_create_project_request_validation() {
        let valid = CreateProjectRequest {
            business_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            team_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a2".to_string(),
            project_name: "Warehouse revamp".to_string(),
            description: None,
            status: None,
        };
        assert!(valid.validate().is_ok());

        let missing_team = CreateProjectRequest {
            business_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            team_id: "".to_string(),
            project_name: "Warehouse revamp".to_string(),
            description: None,
            status: None,
        };
        assert!(missing_team.validate().is_err());
    }
}
