//! Team membership models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::refs::{RoleRef, TeamRef, UserRef};

/// Request payload for creating a team membership.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMembershipRequest {
    #[validate(length(min = 1, message = "Team ID is required"))]
    pub team_id: String,

    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Role ID is required"))]
    pub role_id: String,
}

/// Request payload for updating a team membership.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMembershipRequest {
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub role_id: Option<String>,
}

/// Query parameters for listing team memberships.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamMembershipsQuery {
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub role_id: Option<String>,
}

/// Team membership with all references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembershipResponse {
    pub id: Uuid,
    pub team: TeamRef,
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
        let valid = CreateTeamMembershipRequest {
            team_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            user_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a2".to_string(),
            role_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a3".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_user = CreateTeamMembershipRequest {
            team_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            user_id: "".to_string(),
            role_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a3".to_string(),
        };
        assert!(missing_user.validate().is_err());
    }
}
