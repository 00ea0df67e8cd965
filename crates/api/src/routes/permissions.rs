//! Permission catalog routes.
//!
//! A permission cannot be deleted while any role still references it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{PermissionRepository, RolePermissionRepository};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::permission::{CreatePermissionRequest, Permission, UpdatePermissionRequest};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Create a new permission.
///
/// POST /api/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<Permission>), ApiError> {
    request.validate()?;

    let repo = PermissionRepository::new(state.pool.clone());
    if repo.find_by_name(&request.name, None).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Permission '{}' already exists",
            request.name
        )));
    }

    let permission = repo
        .create(&request.name, request.description.as_deref())
        .await?;

    info!(
        permission_id = %permission.id,
        permission_name = %permission.name,
        user_id = %auth.user_id,
        "Permission created"
    );

    Ok((StatusCode::CREATED, Json(permission.into())))
}

/// List all permissions.
///
/// GET /api/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Permission>>, ApiError> {
    let repo = PermissionRepository::new(state.pool.clone());
    let permissions = repo.list().await?;

    Ok(Json(permissions.into_iter().map(Into::into).collect()))
}

/// Get a permission by ID.
///
/// GET /api/permissions/:id
pub async fn get_permission(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Permission>, ApiError> {
    let id = parse_id(&id, "permission ID")?;
    let repo = PermissionRepository::new(state.pool.clone());

    let permission = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Permission not found".to_string()))?;

    Ok(Json(permission.into()))
}

/// Update a permission.
///
/// PUT /api/permissions/:id
pub async fn update_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdatePermissionRequest>,
) -> Result<Json<Permission>, ApiError> {
    let id = parse_id(&id, "permission ID")?;
    request.validate()?;

    if request.name.is_none() && request.description.is_none() {
        return Err(ApiError::Validation(
            "At least one field (name or description) required".to_string(),
        ));
    }

    let repo = PermissionRepository::new(state.pool.clone());

    if let Some(name) = request.name.as_deref() {
        if repo.find_by_name(name, Some(id)).await?.is_some() {
            return Err(ApiError::Conflict(format!(
                "Permission '{}' already exists",
                name
            )));
        }
    }

    let updated = repo
        .update(id, request.name.as_deref(), request.description.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Permission not found".to_string()))?;

    info!(permission_id = %updated.id, user_id = %auth.user_id, "Permission updated");

    Ok(Json(updated.into()))
}

/// Delete a permission.
///
/// DELETE /api/permissions/:id
pub async fn delete_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "permission ID")?;

    let role_permissions = RolePermissionRepository::new(state.pool.clone());
    if role_permissions.exists_for_permission(id).await? {
        return Err(ApiError::Conflict(
            "Cannot delete permission linked to a role".to_string(),
        ));
    }

    let repo = PermissionRepository::new(state.pool.clone());
    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Permission not found".to_string()));
    }

    info!(permission_id = %id, user_id = %auth.user_id, "Permission deleted");

    Ok(Json(json!({ "message": "Permission deleted successfully" })))
}
