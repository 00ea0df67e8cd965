//! Project membership routes.
//!
//! Membership cascades downward: a project membership can only be created
//! or updated for a user who already holds a membership in the project's
//! team. Scopes are not inherited, each layer stores its own row.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{
    ProjectMembershipRepository, ProjectRepository, RoleRepository, TeamMembershipRepository,
    UserRepository,
};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::project_membership::{
    CreateProjectMembershipRequest, ListProjectMembershipsQuery, ProjectMembershipResponse,
    UpdateProjectMembershipRequest,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Create a new project membership.
///
/// POST /api/project-memberships
pub async fn create_project_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateProjectMembershipRequest>,
) -> Result<(StatusCode, Json<ProjectMembershipResponse>), ApiError> {
    request.validate()?;
    let project_id = parse_id(&request.project_id, "project ID")?;
    let user_id = parse_id(&request.user_id, "user ID")?;
    let role_id = parse_id(&request.role_id, "role ID")?;

    let projects = ProjectRepository::new(state.pool.clone());
    let project = projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let roles = RoleRepository::new(state.pool.clone());
    if roles.find_by_id(role_id).await?.is_none() {
        return Err(ApiError::NotFound("Role not found".to_string()));
    }

    // Cascading containment: project access requires team access
    let team_memberships = TeamMembershipRepository::new(state.pool.clone());
    if team_memberships
        .find_by_team_and_user(project.team_id, user_id, None)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation(
            "User is not a member of the project's team".to_string(),
        ));
    }

    let repo = ProjectMembershipRepository::new(state.pool.clone());
    if repo
        .find_by_project_and_user(project_id, user_id, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User is already a member of this project".to_string(),
        ));
    }

    let membership = repo.create(project_id, user_id, role_id).await?;

    info!(
        membership_id = %membership.id,
        project_id = %project_id,
        member_user_id = %user_id,
        user_id = %auth.user_id,
        "Project membership created"
    );

    let populated = repo
        .find_with_refs(membership.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created membership".to_string()))?;

    Ok((StatusCode::CREATED, Json(populated.into())))
}

/// List project memberships with optional filters.
///
/// GET /api/project-memberships[?projectId=...&userId=...&roleId=...]
pub async fn list_project_memberships(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListProjectMembershipsQuery>,
) -> Result<Json<Vec<ProjectMembershipResponse>>, ApiError> {
    let project_id = query
        .project_id
        .as_deref()
        .map(|raw| parse_id(raw, "project ID"))
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

    let repo = ProjectMembershipRepository::new(state.pool.clone());
    let memberships = repo.list_with_refs(project_id, user_id, role_id).await?;

    Ok(Json(memberships.into_iter().map(Into::into).collect()))
}

/// Get a project membership by ID.
///
/// GET /api/project-memberships/:id
pub async fn get_project_membership(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectMembershipResponse>, ApiError> {
    let id = parse_id(&id, "project membership ID")?;
    let repo = ProjectMembershipRepository::new(state.pool.clone());

    let membership = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project membership not found".to_string()))?;

    Ok(Json(membership.into()))
}

/// Update a project membership.
///
/// PUT /api/project-memberships/:id
pub async fn update_project_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectMembershipRequest>,
) -> Result<Json<ProjectMembershipResponse>, ApiError> {
    let id = parse_id(&id, "project membership ID")?;

    if request.project_id.is_none() && request.user_id.is_none() && request.role_id.is_none() {
        return Err(ApiError::Validation(
            "At least one field (projectId, userId, or roleId) required".to_string(),
        ));
    }

    let project_id = match request.project_id.as_deref() {
        Some(raw) => {
            let project_id = parse_id(raw, "project ID")?;
            let projects = ProjectRepository::new(state.pool.clone());
            if projects.find_by_id(project_id).await?.is_none() {
                return Err(ApiError::NotFound("Project not found".to_string()));
            }
            Some(project_id)
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

    let repo = ProjectMembershipRepository::new(state.pool.clone());
    let membership = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project membership not found".to_string()))?;

    // When the project or user changes, the cascade and uniqueness rules
    // are re-checked against the values the row will end up with.
    if project_id.is_some() || user_id.is_some() {
        let target_project_id = project_id.unwrap_or(membership.project_id);
        let target_user_id = user_id.unwrap_or(membership.user_id);

        let projects = ProjectRepository::new(state.pool.clone());
        let project = projects
            .find_by_id(target_project_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Target project not found".to_string()))?;

        let team_memberships = TeamMembershipRepository::new(state.pool.clone());
        if team_memberships
            .find_by_team_and_user(project.team_id, target_user_id, None)
            .await?
            .is_none()
        {
            return Err(ApiError::Validation(
                "User is not a member of the target project's team".to_string(),
            ));
        }

        if repo
            .find_by_project_and_user(target_project_id, target_user_id, Some(id))
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "User is already a member of this project".to_string(),
            ));
        }
    }

    let updated = repo
        .update(id, project_id, user_id, role_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project membership not found".to_string()))?;

    info!(membership_id = %updated.id, user_id = %auth.user_id, "Project membership updated");

    let populated = repo
        .find_with_refs(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated membership".to_string()))?;

    Ok(Json(populated.into()))
}

/// Delete a project membership.
///
/// DELETE /api/project-memberships/:id
pub async fn delete_project_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "project membership ID")?;
    let repo = ProjectMembershipRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound(
            "Project membership not found".to_string(),
        ));
    }

    info!(membership_id = %id, user_id = %auth.user_id, "Project membership deleted");

    Ok(Json(
        json!({ "message": "Project membership deleted successfully" }),
    ))
}
