//! Role catalog routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::entities::RoleScopeDb;
use persistence::repositories::RoleRepository;
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::role::{CreateRoleRequest, Role, UpdateRoleRequest};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Create a new role.
///
/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    request.validate()?;

    let repo = RoleRepository::new(state.pool.clone());
    if repo
        .find_by_name_and_scope(&request.name, request.scope.into(), None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Role '{}' already exists for scope '{}'",
            request.name, request.scope
        )));
    }

    let role = repo.create(&request.name, request.scope.into()).await?;

    info!(
        role_id = %role.id,
        role_name = %role.name,
        user_id = %auth.user_id,
        "Role created"
    );

    Ok((StatusCode::CREATED, Json(role.into())))
}

/// List all roles.
///
/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Role>>, ApiError> {
    let repo = RoleRepository::new(state.pool.clone());
    let roles = repo.list().await?;

    Ok(Json(roles.into_iter().map(Into::into).collect()))
}

/// Update a role.
///
/// PUT /api/roles/:id
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    let id = parse_id(&id, "role ID")?;
    request.validate()?;

    if request.name.is_none() && request.scope.is_none() {
        return Err(ApiError::Validation(
            "At least one field (name or scope) required".to_string(),
        ));
    }

    let repo = RoleRepository::new(state.pool.clone());
    let role = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Role not found".to_string()))?;

    // (name, scope) uniqueness against the values the row will end up with
    let target_name = request.name.as_deref().unwrap_or(&role.name);
    let target_scope: RoleScopeDb = request.scope.map(Into::into).unwrap_or(role.scope);
    if repo
        .find_by_name_and_scope(target_name, target_scope, Some(id))
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Role '{}' already exists for scope '{}'",
            target_name,
            domain::models::role::RoleScope::from(target_scope)
        )));
    }

    let updated = repo
        .update(id, request.name.as_deref(), request.scope.map(Into::into))
        .await?
        .ok_or_else(|| ApiError::NotFound("Role not found".to_string()))?;

    info!(role_id = %updated.id, user_id = %auth.user_id, "Role updated");

    Ok(Json(updated.into()))
}

/// Delete a role.
///
/// DELETE /api/roles/:id
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "role ID")?;
    let repo = RoleRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Role not found".to_string()));
    }

    info!(role_id = %id, user_id = %auth.user_id, "Role deleted");

    Ok(Json(json!({ "message": "Role deleted successfully" })))
}
