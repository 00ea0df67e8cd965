//! Admin routes.

use axum::{extract::State, Json};
use persistence::repositories::UserRepository;
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::user::SetRoleRequest;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Set a user's global role.
///
/// PUT /api/admin/set-role
///
/// Admin only (enforced by the route layer).
pub async fn set_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .set_role_by_email(&request.email, request.role.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(
        admin_id = %auth.user_id,
        user_id = %user.id,
        role = %request.role,
        "Global role updated"
    );

    Ok(Json(json!({
        "message": "Role updated",
        "user": { "id": user.id, "email": user.email, "role": request.role }
    })))
}
