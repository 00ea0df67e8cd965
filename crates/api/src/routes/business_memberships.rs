//! Business membership routes.
//!
//! A user holds at most one membership per business. The duplicate check
//! excludes the row being updated, so an update may touch its own pair.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::entities::MembershipStatusDb;
use persistence::repositories::{
    BusinessMembershipRepository, BusinessRepository, RoleRepository, UserRepository,
};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::info;
use validator::Validate;

use domain::models::business_membership::{
    BusinessMembershipResponse, CreateBusinessMembershipRequest, ListBusinessMembershipsQuery,
    MembershipStatus, UpdateBusinessMembershipRequest,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

fn parse_status(raw: &str) -> Result<MembershipStatus, ApiError> {
    MembershipStatus::from_str(raw).map_err(|_| {
        ApiError::Validation("Invalid status. Must be active, inactive, or pending".to_string())
    })
}

/// Create a new business membership.
///
/// POST /api/business-memberships
///
/// Status defaults to pending when omitted.
pub async fn create_business_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateBusinessMembershipRequest>,
) -> Result<(StatusCode, Json<BusinessMembershipResponse>), ApiError> {
    request.validate()?;
    let business_id = parse_id(&request.business_id, "business ID")?;
    let user_id = parse_id(&request.user_id, "user ID")?;
    let role_id = parse_id(&request.role_id, "role ID")?;

    let status = match request.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => MembershipStatus::Pending,
    };

    let businesses = BusinessRepository::new(state.pool.clone());
    if businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let roles = RoleRepository::new(state.pool.clone());
    if roles.find_by_id(role_id).await?.is_none() {
        return Err(ApiError::NotFound("Role not found".to_string()));
    }

    let repo = BusinessMembershipRepository::new(state.pool.clone());
    if repo
        .find_by_business_and_user(business_id, user_id, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User is already a member of this business".to_string(),
        ));
    }

    let membership = repo
        .create(business_id, user_id, role_id, status.into())
        .await?;

    info!(
        membership_id = %membership.id,
        business_id = %business_id,
        member_user_id = %user_id,
        user_id = %auth.user_id,
        "Business membership created"
    );

    let populated = repo
        .find_with_refs(membership.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created membership".to_string()))?;

    Ok((StatusCode::CREATED, Json(populated.into())))
}

/// List business memberships with optional filters.
///
/// GET /api/business-memberships[?businessId=...&userId=...&roleId=...&status=...]
pub async fn list_business_memberships(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListBusinessMembershipsQuery>,
) -> Result<Json<Vec<BusinessMembershipResponse>>, ApiError> {
    let business_id = query
        .business_id
        .as_deref()
        .map(|raw| parse_id(raw, "business ID"))
        .transpose()?;
    let user_id = query
        .user_id
        .as_deref()
        .map(|raw| parse_id(raw, "user ID"))
        .transpose()?;
    let role_id = query
        .role_id
        .as_deref()
        .map(|raw| parse_id(raw, "role ID"))
        .transpose()?;
    let status = query.status.as_deref().map(parse_status).transpose()?;

    let repo = BusinessMembershipRepository::new(state.pool.clone());
    let memberships = repo
        .list_with_refs(
            business_id,
            user_id,
            role_id,
            status.map(MembershipStatusDb::from),
        )
        .await?;

    Ok(Json(memberships.into_iter().map(Into::into).collect()))
}

/// Get a business membership by ID.
///
/// GET /api/business-memberships/:id
pub async fn get_business_membership(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BusinessMembershipResponse>, ApiError> {
    let id = parse_id(&id, "business membership ID")?;
    let repo = BusinessMembershipRepository::new(state.pool.clone());

    let membership = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business membership not found".to_string()))?;

    Ok(Json(membership.into()))
}

/// Update a business membership.
///
/// PUT /api/business-memberships/:id
pub async fn update_business_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBusinessMembershipRequest>,
) -> Result<Json<BusinessMembershipResponse>, ApiError> {
    let id = parse_id(&id, "business membership ID")?;

    if request.business_id.is_none()
        && request.user_id.is_none()
        && request.role_id.is_none()
        && request.status.is_none()
    {
        return Err(ApiError::Validation(
            "At least one field (businessId, userId, roleId, or status) required".to_string(),
        ));
    }

    let business_id = match request.business_id.as_deref() {
        Some(raw) => {
            let business_id = parse_id(raw, "business ID")?;
            let businesses = BusinessRepository::new(state.pool.clone());
            if businesses.find_by_id(business_id).await?.is_none() {
                return Err(ApiError::NotFound("Business not found".to_string()));
            }
            Some(business_id)
        }
        None => None,
    };

    let user_id = match request.user_id.as_deref() {
        Some(raw) => {
            let user_id = parse_id(raw, "user ID")?;
            let users = UserRepository::new(state.pool.clone());
            if users.find_by_id(user_id).await?.is_none() {
                return Err(ApiError::NotFound("User not found".to_string()));
            }
            Some(user_id)
        }
        None => None,
    };

    let role_id = match request.role_id.as_deref() {
        Some(raw) => {
            let role_id = parse_id(raw, "role ID")?;
            let roles = RoleRepository::new(state.pool.clone());
            if roles.find_by_id(role_id).await?.is_none() {
                return Err(ApiError::NotFound("Role not found".to_string()));
            }
            Some(role_id)
        }
        None => None,
    };

    let status = request.status.as_deref().map(parse_status).transpose()?;

    let repo = BusinessMembershipRepository::new(state.pool.clone());
    let membership = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business membership not found".to_string()))?;

    // Duplicate check against the pair the row will end up with, excluding
    // the row itself
    if business_id.is_some() || user_id.is_some() {
        let target_business = business_id.unwrap_or(membership.business_id);
        let target_user = user_id.unwrap_or(membership.user_id);
        if repo
            .find_by_business_and_user(target_business, target_user, Some(id))
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "User is already a member of this business".to_string(),
            ));
        }
    }

    let updated = repo
        .update(
            id,
            business_id,
            user_id,
            role_id,
            status.map(MembershipStatusDb::from),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Business membership not found".to_string()))?;

    info!(membership_id = %updated.id, user_id = %auth.user_id, "Business membership updated");

    let populated = repo
        .find_with_refs(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated membership".to_string()))?;

    Ok(Json(populated.into()))
}

/// Delete a business membership.
///
/// DELETE /api/business-memberships/:id
pub async fn delete_business_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "business membership ID")?;
    let repo = BusinessMembershipRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound(
            "Business membership not found".to_string(),
        ));
    }

    info!(membership_id = %id, user_id = %auth.user_id, "Business membership deleted");

    Ok(Json(
        json!({ "message": "Business membership deleted successfully" }),
    ))
}
