//! Milestone routes.
//!
//! Every operation requires the caller to hold a membership in the
//! milestone's project, and every assignee must hold one as well.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::entities::{MilestoneWithProjectEntity, ProgressStatusDb};
use persistence::repositories::{
    MilestoneRepository, ProjectMembershipRepository, ProjectRepository, UserRepository,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::milestone::{
    CreateMilestoneRequest, ListMilestonesQuery, MilestoneResponse, UpdateMilestoneRequest,
};
use domain::models::project::ProgressStatus;
use domain::models::refs::UserRef;

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Parses the assignedTo list, rejecting malformed entries individually.
fn parse_assignees(raw: &[String]) -> Result<Vec<Uuid>, ApiError> {
    raw.iter()
        .map(|value| {
            Uuid::parse_str(value).map_err(|_| {
                ApiError::Validation(format!("Invalid user ID in assignedTo: {}", value))
            })
        })
        .collect()
}

/// Checks that every assignee holds a membership in the project.
async fn require_assignees_are_members(
    state: &AppState,
    project_id: Uuid,
    assignees: &[Uuid],
) -> Result<(), ApiError> {
    if assignees.is_empty() {
        return Ok(());
    }
    let repo = ProjectMembershipRepository::new(state.pool.clone());
    let members = repo.members_among(project_id, assignees).await?;
    for id in assignees {
        if !members.contains(id) {
            return Err(ApiError::Validation(format!(
                "User {} is not a member of the project",
                id
            )));
        }
    }
    Ok(())
}

/// Checks that the caller holds a membership in the project.
async fn require_caller_is_member(
    state: &AppState,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), ApiError> {
    let repo = ProjectMembershipRepository::new(state.pool.clone());
    if repo
        .find_by_project_and_user(project_id, user_id, None)
        .await?
        .is_none()
    {
        return Err(ApiError::Forbidden(
            "You are not a member of this project".to_string(),
        ));
    }
    Ok(())
}

/// Expands a milestone row into its response, resolving assignees.
async fn to_response(
    state: &AppState,
    entity: MilestoneWithProjectEntity,
) -> Result<MilestoneResponse, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let assigned_users = if entity.assigned_to.is_empty() {
        Vec::new()
    } else {
        users.find_by_ids(&entity.assigned_to).await?
    };

    Ok(MilestoneResponse {
        id: entity.id,
        project: entity.project_ref(),
        name: entity.name.clone(),
        description: entity.description.clone(),
        due_date: entity.due_date,
        status: entity.status.into(),
        assigned_to: assigned_users.iter().map(UserRef::from).collect(),
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    })
}

/// Create a new milestone.
///
/// POST /api/milestones
pub async fn create_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateMilestoneRequest>,
) -> Result<(StatusCode, Json<MilestoneResponse>), ApiError> {
    request.validate()?;
    let project_id = parse_id(&request.project_id, "project ID")?;

    let assignees = match request.assigned_to.as_deref() {
        Some(raw) => parse_assignees(raw)?,
        None => Vec::new(),
    };

    let projects = ProjectRepository::new(state.pool.clone());
    if projects.find_by_id(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    require_caller_is_member(&state, project_id, auth.user_id).await?;
    require_assignees_are_members(&state, project_id, &assignees).await?;

    let status = request.status.unwrap_or(ProgressStatus::Pending);
    let repo = MilestoneRepository::new(state.pool.clone());
    let milestone = repo
        .create(
            project_id,
            &request.name,
            request.description.as_deref(),
            request.due_date,
            ProgressStatusDb::from(status),
            &assignees,
        )
        .await?;

    info!(
        milestone_id = %milestone.id,
        project_id = %project_id,
        user_id = %auth.user_id,
        "Milestone created"
    );

    let populated = repo
        .find_with_project(milestone.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created milestone".to_string()))?;

    Ok((StatusCode::CREATED, Json(to_response(&state, populated).await?)))
}

/// List milestones of a project, newest first.
///
/// GET /api/milestones?projectId=...
pub async fn list_milestones(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListMilestonesQuery>,
) -> Result<Json<Vec<MilestoneResponse>>, ApiError> {
    let project_id = query
        .project_id
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Project ID is required".to_string()))?;
    let project_id = parse_id(project_id, "project ID")?;

    let projects = ProjectRepository::new(state.pool.clone());
    if projects.find_by_id(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    require_caller_is_member(&state, project_id, auth.user_id).await?;

    let repo = MilestoneRepository::new(state.pool.clone());
    let milestones = repo.list_for_project(project_id).await?;

    let mut responses = Vec::with_capacity(milestones.len());
    for milestone in milestones {
        responses.push(to_response(&state, milestone).await?);
    }

    Ok(Json(responses))
}

/// Update a milestone.
///
/// PUT /api/milestones/:id
pub async fn update_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateMilestoneRequest>,
) -> Result<Json<MilestoneResponse>, ApiError> {
    let id = parse_id(&id, "milestone ID")?;

    let repo = MilestoneRepository::new(state.pool.clone());
    let milestone = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Milestone not found".to_string()))?;

    require_caller_is_member(&state, milestone.project_id, auth.user_id).await?;

    let assignees = match request.assigned_to.as_deref() {
        Some(raw) => {
            let parsed = parse_assignees(raw)?;
            require_assignees_are_members(&state, milestone.project_id, &parsed).await?;
            Some(parsed)
        }
        None => None,
    };

    let updated = repo
        .update(
            id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.due_date,
            request.status.map(ProgressStatusDb::from),
            assignees.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Milestone not found".to_string()))?;

    info!(milestone_id = %updated.id, user_id = %auth.user_id, "Milestone updated");

    let populated = repo
        .find_with_project(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated milestone".to_string()))?;

    Ok(Json(to_response(&state, populated).await?))
}

/// Delete a milestone.
///
/// DELETE /api/milestones/:id
pub async fn delete_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "milestone ID")?;

    let repo = MilestoneRepository::new(state.pool.clone());
    let milestone = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Milestone not found".to_string()))?;

    require_caller_is_member(&state, milestone.project_id, auth.user_id).await?;

    repo.delete(id).await?;

    info!(milestone_id = %id, user_id = %auth.user_id, "Milestone deleted");

    Ok(Json(json!({ "message": "Milestone deleted successfully" })))
}
