//! Business membership models.
//!
//! A membership row binds a user to a business with a role and a status;
//! a user holds at most one membership per business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::refs::{BusinessRef, RoleRef, UserRef};

/// Lifecycle status of a business membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Inactive,
    Pending,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Inactive => "inactive",
            MembershipStatus::Pending => "pending",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MembershipStatus::Active),
            "inactive" => Ok(MembershipStatus::Inactive),
            "pending" => Ok(MembershipStatus::Pending),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request payload for creating a business membership.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessMembershipRequest {
    #[validate(length(min = 1, message = "Business ID is required"))]
    pub business_id: String,

    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Role ID is required"))]
    pub role_id: String,

    /// Defaults to pending when omitted.
    pub status: Option<String>,
}

/// Request payload for updating a business membership.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessMembershipRequest {
    pub business_id: Option<String>,
    pub user_id: Option<String>,
    pub role_id: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for listing business memberships.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBusinessMembershipsQuery {
    pub business_id: Option<String>,
    pub user_id: Option<String>,
    pub role_id: Option<String>,
    pub status: Option<String>,
}

/// Business membership with all references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMembershipResponse {
    pub id: Uuid,
    pub business: BusinessRef,
    pub user: UserRef,
    pub role: RoleRef,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_status_round_trip() {
        for s in ["active", "inactive", "pending"] {
            assert_eq!(MembershipStatus::from_str(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_membership_status_rejects_unknown() {
        assert!(MembershipStatus::from_str("suspended").is_err());
        assert!(MembershipStatus::from_str("Active").is_err());
    }

    #[test]
    fn test_membership_status_serialization() {
        assert_eq!(
            serde_json::to_string(&MembershipStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_create_request_requires_ids() {
        let missing_role = CreateBusinessMembershipRequest {
            business_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1".to_string(),
            user_id: "c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a2".to_string(),
            role_id: "".to_string(),
            status: None,
        };
        assert!(missing_role.validate().is_err());
    }
}
