//! Team management routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{BusinessRepository, TeamRepository};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::team::{CreateTeamRequest, ListTeamsQuery, TeamResponse, UpdateTeamRequest};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Create a new team.
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    request.validate()?;
    let business_id = parse_id(&request.business_id, "business ID")?;

    let businesses = BusinessRepository::new(state.pool.clone());
    if businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let repo = TeamRepository::new(state.pool.clone());
    if repo
        .find_by_business_and_name(business_id, &request.name, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Team '{}' already exists for this business",
            request.name
        )));
    }

    let team = repo.create(business_id, &request.name).await?;

    info!(
        team_id = %team.id,
        business_id = %business_id,
        user_id = %auth.user_id,
        "Team created"
    );

    let populated = repo
        .find_with_business(team.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created team".to_string()))?;

    Ok((StatusCode::CREATED, Json(populated.into())))
}

/// List teams, optionally filtered by business.
///
/// GET /api/teams[?businessId=...]
pub async fn list_teams(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let business_id = query
        .business_id
        .as_deref()
        .map(|raw| parse_id(raw, "business ID"))
        .transpose()?;

    let repo = TeamRepository::new(state.pool.clone());
    let teams = repo.list_with_business(business_id).await?;

    Ok(Json(teams.into_iter().map(Into::into).collect()))
}

/// Get a team by ID.
///
/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_id(&id, "team ID")?;
    let repo = TeamRepository::new(state.pool.clone());

    let team = repo
        .find_with_business(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    Ok(Json(team.into()))
}

/// Update a team.
///
/// PUT /api/teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_id(&id, "team ID")?;

    if request.name.is_none() && request.business_id.is_none() {
        return Err(ApiError::Validation(
            "At least one field (name or businessId) required".to_string(),
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

    let repo = TeamRepository::new(state.pool.clone());
    let team = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    // Name uniqueness within the (possibly updated) business
    if let Some(name) = request.name.as_deref() {
        let target_business = business_id.unwrap_or(team.business_id);
        if repo
            .find_by_business_and_name(target_business, name, Some(id))
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(format!(
                "Team '{}' already exists for this business",
                name
            )));
        }
    }

    let updated = repo
        .update(id, request.name.as_deref(), business_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    info!(team_id = %updated.id, user_id = %auth.user_id, "Team updated");

    let populated = repo
        .find_with_business(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated team".to_string()))?;

    Ok(Json(populated.into()))
}

/// Delete a team.
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "team ID")?;
    let repo = TeamRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Team not found".to_string()));
    }

    info!(team_id = %id, user_id = %auth.user_id, "Team deleted");

    Ok(Json(json!({ "message": "Team deleted successfully" })))
}
