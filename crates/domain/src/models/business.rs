//! Business domain models.
//!
//! A business is the top-level tenant container. Teams, projects,
//! memberships and chat messages all scope themselves to one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::refs::UserRef;

/// Kind of business, a fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessType {
    Factory,
    Shop,
    #[serde(rename = "Dairy Farm")]
    DairyFarm,
    School,
    #[serde(rename = "Data Engineer")]
    DataEngineer,
    Other,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Factory => "Factory",
            BusinessType::Shop => "Shop",
            BusinessType::DairyFarm => "Dairy Farm",
            BusinessType::School => "School",
            BusinessType::DataEngineer => "Data Engineer",
            BusinessType::Other => "Other",
        }
    }

    /// All accepted values, for validation error messages.
    pub fn all() -> &'static [BusinessType] {
        &[
            BusinessType::Factory,
            BusinessType::Shop,
            BusinessType::DairyFarm,
            BusinessType::School,
            BusinessType::DataEngineer,
            BusinessType::Other,
        ]
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Factory" => Ok(BusinessType::Factory),
            "Shop" => Ok(BusinessType::Shop),
            "Dairy Farm" => Ok(BusinessType::DairyFarm),
            "School" => Ok(BusinessType::School),
            "Data Engineer" => Ok(BusinessType::DataEngineer),
            "Other" => Ok(BusinessType::Other),
            _ => Err(format!("Invalid business type: {}", s)),
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A business tenant.
#[derive(Debug, Clone)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub business_type: BusinessType,
    pub description: Option<String>,
    pub image: Option<String>,
    pub super_admin_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for updating a business.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: Option<String>,

    /// Accepted as a raw string so unknown values produce a precise error.
    #[serde(rename = "type")]
    pub business_type: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Query parameters for listing businesses.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBusinessesQuery {
    /// When true, only businesses owned by the caller are returned.
    pub mine: Option<bool>,
}

/// Business representation with the owner expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub business_type: BusinessType,
    pub description: Option<String>,
    pub image: Option<String>,
    pub super_admin_user: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_type_round_trip() {
        for ty in BusinessType::all() {
            assert_eq!(BusinessType::from_str(ty.as_str()).unwrap(), *ty);
        }
    }

    #[test]
    fn test_business_type_from_str_rejects_unknown() {
        assert!(BusinessType::from_str("Bakery").is_err());
        assert!(BusinessType::from_str("shop").is_err());
    }

    #[test]
    fn test_business_type_serialization_uses_display_names() {
        assert_eq!(
            serde_json::to_string(&BusinessType::DairyFarm).unwrap(),
            "\"Dairy Farm\""
        );
        assert_eq!(
            serde_json::to_string(&BusinessType::DataEngineer).unwrap(),
            "\"Data Engineer\""
        );
        assert_eq!(serde_json::to_string(&BusinessType::Shop).unwrap(), "\"Shop\"");
    }

    #[test]
    fn test_business_type_deserialization() {
        let ty: BusinessType = serde_json::from_str("\"Dairy Farm\"").unwrap();
        assert_eq!(ty, BusinessType::DairyFarm);
    }

    #[test]
    fn test_update_business_request_validation() {
        let valid = UpdateBusinessRequest {
            name: Some("Acme".to_string()),
            business_type: Some("Shop".to_string()),
            description: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = UpdateBusinessRequest {
            name: Some("  ".to_string()),
            business_type: None,
            description: None,
        };
        assert!(empty_name.validate().is_err());
    }
}
