//! Role/permission attachment routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{
    PermissionRepository, RolePermissionRepository, RoleRepository,
};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::role_permission::{
    CreateRolePermissionRequest, ListRolePermissionsQuery, RolePermissionResponse,
    UpdateRolePermissionRequest,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Attach a permission to a role.
///
/// POST /api/role-permissions
pub async fn create_role_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateRolePermissionRequest>,
) -> Result<(StatusCode, Json<RolePermissionResponse>), ApiError> {
    request.validate()?;
    let role_id = parse_id(&request.role_id, "role ID")?;
    let permission_id = parse_id(&request.permission_id, "permission ID")?;

    let roles = RoleRepository::new(state.pool.clone());
    if roles.find_by_id(role_id).await?.is_none() {
        return Err(ApiError::NotFound("Role not found".to_string()));
    }

    let permissions = PermissionRepository::new(state.pool.clone());
    if permissions.find_by_id(permission_id).await?.is_none() {
        return Err(ApiError::NotFound("Permission not found".to_string()));
    }

    let repo = RolePermissionRepository::new(state.pool.clone());
    if repo
        .find_pair(role_id, permission_id, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "This role already has this permission".to_string(),
        ));
    }

    let pair = repo.create(role_id, permission_id).await?;

    info!(
        role_permission_id = %pair.id,
        role_id = %role_id,
        permission_id = %permission_id,
        user_id = %auth.user_id,
        "Permission attached to role"
    );

    let populated = repo
        .find_with_refs(pair.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created role permission".to_string()))?;

    Ok((StatusCode::CREATED, Json(populated.into())))
}

/// List role/permission pairs with optional filters.
///
/// GET /api/role-permissions[?roleId=...&permissionId=...]
pub async fn list_role_permissions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListRolePermissionsQuery>,
) -> Result<Json<Vec<RolePermissionResponse>>, ApiError> {
    let role_id = query
        .role_id
        .as_deref()
        .map(|raw| parse_id(raw, "role ID"))
        .transpose()?;
    let permission_id = query
        .permission_id
        .as_deref()
        .map(|raw| parse_id(raw, "permission ID"))
        .transpose()?;

    let repo = RolePermissionRepository::new(state.pool.clone());
    let pairs = repo.list_with_refs(role_id, permission_id).await?;

    Ok(Json(pairs.into_iter().map(Into::into).collect()))
}

/// Get a role/permission pair by ID.
///
/// GET /api/role-permissions/:id
pub async fn get_role_permission(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RolePermissionResponse>, ApiError> {
    let id = parse_id(&id, "role permission ID")?;
    let repo = RolePermissionRepository::new(state.pool.clone());

    let pair = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Role permission not found".to_string()))?;

    Ok(Json(pair.into()))
}

/// Update a role/permission pair.
///
/// PUT /api/role-permissions/:id
pub async fn update_role_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateRolePermissionRequest>,
) -> Result<Json<RolePermissionResponse>, ApiError> {
    let id = parse_id(&id, "role permission ID")?;

    if request.role_id.is_none() && request.permission_id.is_none() {
        return Err(ApiError::Validation(
            "At least one field (roleId or permissionId) required".to_string(),
        ));
    }

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

    let permission_id = match request.permission_id.as_deref() {
        Some(raw) => {
            let permission_id = parse_id(raw, "permission ID")?;
            let permissions = PermissionRepository::new(state.pool.clone());
            if permissions.find_by_id(permission_id).await?.is_none() {
                return Err(ApiError::NotFound("Permission not found".to_string()));
            }
            Some(permission_id)
        }
        None => None,
    };

    let repo = RolePermissionRepository::new(state.pool.clone());
    let pair = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Role permission not found".to_string()))?;

    // Pair uniqueness against the values the row will end up with
    let target_role = role_id.unwrap_or(pair.role_id);
    let target_permission = permission_id.unwrap_or(pair.permission_id);
    if repo
        .find_pair(target_role, target_permission, Some(id))
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "This role already has this permission".to_string(),
        ));
    }

    let updated = repo
        .update(id, role_id, permission_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Role permission not found".to_string()))?;

    info!(role_permission_id = %updated.id, user_id = %auth.user_id, "Role permission updated");

    let populated = repo
        .find_with_refs(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated role permission".to_string()))?;

    Ok(Json(populated.into()))
}

/// Detach a permission from a role.
///
/// DELETE /api/role-permissions/:id
pub async fn delete_role_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "role permission ID")?;
    let repo = RolePermissionRepository::new(state.pool.clone());

    let rows_affected = repo.delete(id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Role permission not found".to_string()));
    }

    info!(role_permission_id = %id, user_id = %auth.user_id, "Role permission deleted");

    Ok(Json(json!({ "message": "Role permission deleted successfully" })))
}
