//! Team membership routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{
    RoleRepository, TeamMembershipRepository, TeamRepository, UserRepository,
};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::team_membership::{
    CreateTeamMembershipRequest, ListTeamMembershipsQuery, TeamMembershipResponse,
    UpdateTeamMembershipRequest,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Create a new team membership.
///
/// POST /api/team-memberships
pub async fn create_team_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateTeamMembershipRequest>,
) -> Result<(StatusCode, Json<TeamMembershipResponse>), ApiError> {
    request.validate()?;
    let team_id = parse_id(&request.team_id, "team ID")?;
    let user_id = parse_id(&request.user_id, "user ID")?;
    let role_id = parse_id(&request.role_id, "role ID")?;

    let teams = TeamRepository::new(state.pool.clone());
    if teams.find_by_id(team_id).await?.is_none() {
        return Err(ApiError::NotFound("Team not found".to_string()));
    }

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let roles = RoleRepository::new(state.pool.clone());
    if roles.find_by_id(role_id).await?.is_none() {
        return Err(ApiError::NotFound("Role not found".to_string()));
    }

    let repo = TeamMembershipRepository::new(state.pool.clone());
    if repo
        .find_by_team_and_user(team_id, user_id, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User is already a member of this team".to_string(),
        ));
    }

    let membership = repo.create(team_id, user_id, role_id).await?;

    info!(
        membership_id = %membership.id,
        team_id = %team_id,
        member_user_id = %user_id,
        user_id = %auth.user_id,
        "Team membership created"
    );

    let populated = repo
        .find_with_refs(membership.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created membership".to_string()))?;

    Ok((StatusCode::CREATED, Json(populated.into())))
}

/// List team memberships with optional filters.
///
/// GET /api/team-memberships[?teamId=...&userId=...&roleId=...]
pub async fn list_team_memberships(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListTeamMembershipsQuery>,
) -> Result<Json<Vec<TeamMembershipResponse>>, ApiError> {
    let team_id = query
        .team_id
        .as_deref()
        .map(|raw| parse_id(raw, "team ID"))
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

    let repo = TeamMembershipRepository::new(state.pool.clone());
    let memberships = repo.list_with_refs(team_id, user_id, role_id).await?;

    Ok(Json(memberships.into_iter().map(Into::into).collect()))
}

/// Get a team membership by ID.
///
/// GET /api/team-memberships/:id
pub async fn get_team_membership(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TeamMembershipResponse>, ApiError> {
    let id = parse_id(&id, "team membership ID")?;
    let repo = TeamMembershipRepository::new(state.pool.clone());

    let membership = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team membership not found".to_string()))?;

    Ok(Json(membership.into()))
}

/// Update a team membership.
///
/// PUT /api/team-memberships/:id
pub async fn update_team_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateTeamMembershipRequest>,
) -> Result<Json<TeamMembershipResponse>, ApiError> {
    let id = parse_id(&id, "team membership ID")?;

    if request.team_id.is_none() && request.user_id.is_none() && request.role_id.is_none() {
        return Err(ApiError::Validation(
            "At least one field (teamId, userId, or roleId) required".to_string(),
        ));
    }

    let team_id = match request.team_id.as_deref() {
        Some(raw) => {
            let team_id = parse_id(raw, "team ID")?;
            let teams = TeamRepository::new(state.pool.clone());
            if teams.find_by_id(team_id).await?.is_none() {
                return Err(ApiError::NotFound("Team not found".to_string()));
            }
            Some(team_id)
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

    let repo = TeamMembershipRepository::new(state.pool.clone());
    let membership = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team membership not found".to_string()))?;

    // Duplicate check against the pair the row will end up with, excluding
    // the row itself
    if team_id.is_some() || user_id.is_some() {
        let target_team = team_id.unwrap_or(membership.team_id);
        let target_user = user_id.unwrap_or(membership.user_id);
        if repo
            .find_by_team_and_user(target_team, target_user, Some(id))
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "User is already a member of this team".to_string(),
            ));
        }
    }

    let updated = repo
        .update(id, team_id, user_id, role_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team membership not found".to_string()))?;

    info!(membership_id = %updated.id, user_id = %auth.user_id, "Team membership updated");

    let populated = repo
        .find_with_refs(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated membership".to_string()))?;

    Ok(Json(populated.into()))
}

/// Delete a team membership.
///
/// DELETE /api/team-memberships/:id
pub async fn delete_team_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "team membership ID")?;
    let repo = TeamMembershipRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Team membership not found".to_string()));
    }

    info!(membership_id = %id, user_id = %auth.user_id, "Team membership deleted");

    Ok(Json(
        json!({ "message": "Team membership deleted successfully" }),
    ))
}
