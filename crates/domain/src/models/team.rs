//! Team domain models.
//!
//! Teams nest under a business; the team name is unique within it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::refs::BusinessRef;

/// A team within a business.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a team.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, message = "Business ID is required"))]
    pub business_id: String,

    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: String,
}

/// Request payload for updating a team.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub business_id: Option<String>,
}

/// Query parameters for listing teams.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsQuery {
    pub business_id: Option<String>,
}

/// Team representation with the business expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub business: BusinessRef,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_request_validation() {
        let valid = CreateTeamRequest {
            business_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            name: "Platform".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateTeamRequest {
            business_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            name: "".to_string(),
        };
        assert!(empty_name.validate().is_err());
    }
}
