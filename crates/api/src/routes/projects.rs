//! Project management routes.
//!
//! A project's team must belong to the project's business, both on create
//! and on any update that changes either reference.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::entities::ProgressStatusDb;
use persistence::repositories::{BusinessRepository, ProjectRepository, TeamRepository};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::info;
use validator::Validate;

use domain::models::project::{
    CreateProjectRequest, ListProjectsQuery, ProgressStatus, ProjectResponse, UpdateProjectRequest,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Create a new project.
///
/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    request.validate()?;
    let business_id = parse_id(&request.business_id, "business ID")?;
    let team_id = parse_id(&request.team_id, "team ID")?;

    let businesses = BusinessRepository::new(state.pool.clone());
    if businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let teams = TeamRepository::new(state.pool.clone());
    let team = teams
        .find_by_id(team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    if team.business_id != business_id {
        return Err(ApiError::Validation(
            "Team does not belong to the specified business".to_string(),
        ));
    }

    let repo = ProjectRepository::new(state.pool.clone());
    if repo
        .find_by_business_and_name(business_id, &request.project_name, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Project '{}' already exists in this business",
            request.project_name
        )));
    }

    let status = request.status.unwrap_or(ProgressStatus::Pending);
    let project = repo
        .create(
            business_id,
            team_id,
            &request.project_name,
            request.description.as_deref(),
            ProgressStatusDb::from(status),
        )
        .await?;

    info!(
        project_id = %project.id,
        business_id = %business_id,
        team_id = %team_id,
        user_id = %auth.user_id,
        "Project created"
    );

    let populated = repo
        .find_with_refs(project.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created project".to_string()))?;

    Ok((StatusCode::CREATED, Json(populated.into())))
}

/// List projects with optional filters.
///
/// GET /api/projects[?businessId=...&teamId=...&status=...]
pub async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let business_id = query
        .business_id
        .as_deref()
        .map(|raw| parse_id(raw, "business ID"))
        .transpose()?;
    let team_id = query
        .team_id
        .as_deref()
        .map(|raw| parse_id(raw, "team ID"))
        .transpose()?;
    let status = query
        .status
        .as_deref()
        .map(|raw| {
            ProgressStatus::from_str(raw).map_err(|_| {
                ApiError::Validation(
                    "Invalid status. Must be pending, in_progress, or completed".to_string(),
                )
            })
        })
        .transpose()?;

    let repo = ProjectRepository::new(state.pool.clone());
    let projects = repo
        .list_with_refs(business_id, team_id, status.map(ProgressStatusDb::from))
        .await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Get a project by ID.
///
/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_id(&id, "project ID")?;
    let repo = ProjectRepository::new(state.pool.clone());

    let project = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project.into()))
}

/// Update a project.
///
/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_id(&id, "project ID")?;

    if request.business_id.is_none()
        && request.team_id.is_none()
        && request.project_name.is_none()
        && request.description.is_none()
        && request.status.is_none()
    {
        return Err(ApiError::Validation(
            "At least one field is required".to_string(),
        ));
    }

    let repo = ProjectRepository::new(state.pool.clone());
    let project = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

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

    let team_id = match request.team_id.as_deref() {
        Some(raw) => Some(parse_id(raw, "team ID")?),
        None => None,
    };

    // Whenever either reference changes, the (possibly updated) team must
    // belong to the (possibly updated) business.
    if business_id.is_some() || team_id.is_some() {
        let target_business = business_id.unwrap_or(project.business_id);
        let target_team = team_id.unwrap_or(project.team_id);

        let teams = TeamRepository::new(state.pool.clone());
        let team = teams
            .find_by_id(target_team)
            .await?
            .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

        if team.business_id != target_business {
            return Err(ApiError::Validation(
                "Team does not belong to the specified business".to_string(),
            ));
        }
    }

    // Name uniqueness within the (possibly updated) business
    if let Some(project_name) = request.project_name.as_deref() {
        let target_business = business_id.unwrap_or(project.business_id);
        if repo
            .find_by_business_and_name(target_business, project_name, Some(id))
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(format!(
                "Project '{}' already exists in this business",
                project_name
            )));
        }
    }

    let updated = repo
        .update(
            id,
            business_id,
            team_id,
            request.project_name.as_deref(),
            request.description.as_deref(),
            request.status.map(ProgressStatusDb::from),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    info!(project_id = %updated.id, user_id = %auth.user_id, "Project updated");

    let populated = repo
        .find_with_refs(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated project".to_string()))?;

    Ok(Json(populated.into()))
}

/// Delete a project.
///
/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "project ID")?;
    let repo = ProjectRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    info!(project_id = %id, user_id = %auth.user_id, "Project deleted");

    Ok(Json(json!({ "message": "Project deleted successfully" })))
}
