//! Project membership models.
//!
//! Project access requires team access: a project membership can only exist
//! for a user who already holds a membership in the project's team.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::refs::{ProjectRef, RoleRef, UserRef};

/// Request payload for creating a project membership.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectMembershipRequest {
    #[validate(length(min = 1, message = "Project ID is required"))]
    pub project_id: String,

    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Role ID is required"))]
    pub role_id: String,
}

/// Request payload for updating a project membership.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectMembershipRequest {
    pub project_id: Option<String>,
    pub user_id: Option<String>,
    pub role_id: Option<String>,
}

/// Query parameters for listing project memberships.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectMembershipsQuery {
    pub project_id: Option<String>,
    pub user_id: Option<String>,
    pub role_id: Option<String>,
}

/// Project membership with all references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMembershipResponse {
    pub id: Uuid,
    pub project: ProjectRef,
    pub user: UserRef,
    pub role: RoleRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_all_ids() {
        let missing_project = CreateProjectMembershipRequest {
            project_id: "".to_string(),
            user_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a2".to_string(),
            role_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a3".to_string(),
        };
        assert!(missing_project.validate().is_err());
    }
}
