//! Business management routes.
//!
//! Creation is multipart (an optional logo file rides along with the form
//! fields) and restricted to global admins. Any failure after the logo was
//! stored removes the file again before the error is returned.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::entities::BusinessTypeDb;
use persistence::repositories::{BusinessRepository, UserRepository};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::info;
use validator::Validate;

use domain::models::business::{
    BusinessResponse, BusinessType, ListBusinessesQuery, UpdateBusinessRequest,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Collected multipart fields of a create-business request.
#[derive(Default)]
struct CreateBusinessFields {
    name: Option<String>,
    business_type: Option<String>,
    description: Option<String>,
    super_admin_user_id: Option<String>,
    image: Option<String>,
}

/// Reads the multipart stream, storing the logo as soon as it appears.
/// On error the path of an already-stored logo is handed back so the
/// caller can remove it.
async fn collect_fields(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<CreateBusinessFields, (Option<String>, ApiError)> {
    let mut fields = CreateBusinessFields::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((fields.image, ApiError::Validation(e.to_string()))),
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or("image.bin").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => return Err((fields.image, ApiError::Validation(e.to_string()))),
            };
            match state
                .uploads
                .save("image", &filename, &content_type, &bytes)
                .await
            {
                Ok(path) => fields.image = Some(path),
                Err(e) => return Err((fields.image, ApiError::Validation(e.to_string()))),
            }
        } else {
            let value = match field.text().await {
                Ok(value) => value,
                Err(e) => return Err((fields.image, ApiError::Validation(e.to_string()))),
            };
            match name.as_str() {
                "name" => fields.name = Some(value),
                "type" => fields.business_type = Some(value),
                "description" => fields.description = Some(value),
                "superAdminUserId" => fields.super_admin_user_id = Some(value),
                _ => {}
            }
        }
    }

    Ok(fields)
}

/// Create a new business.
///
/// POST /api/businesses (multipart)
///
/// Global admin only (enforced by the route layer).
pub async fn create_business(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BusinessResponse>), ApiError> {
    let fields = match collect_fields(&state, &mut multipart).await {
        Ok(fields) => fields,
        Err((stored, err)) => {
            if let Some(path) = stored {
                state.uploads.remove(&path).await;
            }
            return Err(err);
        }
    };

    match create_business_inner(&state, &auth, &fields).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(err) => {
            if let Some(path) = &fields.image {
                state.uploads.remove(path).await;
            }
            Err(err)
        }
    }
}

/// Validation and persistence of a create-business request; the caller
/// handles logo cleanup on error.
async fn create_business_inner(
    state: &AppState,
    auth: &AuthUser,
    fields: &CreateBusinessFields,
) -> Result<BusinessResponse, ApiError> {
    let name = fields
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| {
            ApiError::Validation("Name, type, and superAdminUserId are required".to_string())
        })?;
    let type_str = fields.business_type.as_deref().ok_or_else(|| {
        ApiError::Validation("Name, type, and superAdminUserId are required".to_string())
    })?;
    let owner_str = fields.super_admin_user_id.as_deref().ok_or_else(|| {
        ApiError::Validation("Name, type, and superAdminUserId are required".to_string())
    })?;

    let business_type = BusinessType::from_str(type_str)
        .map_err(|_| ApiError::Validation("Invalid business type".to_string()))?;
    let owner_id = parse_id(owner_str, "super admin user ID")?;

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_id(owner_id).await?.is_none() {
        return Err(ApiError::NotFound("Super admin user not found".to_string()));
    }

    let repo = BusinessRepository::new(state.pool.clone());
    let business = repo
        .create(
            name,
            BusinessTypeDb::from(business_type),
            fields.description.as_deref(),
            fields.image.as_deref(),
            owner_id,
        )
        .await?;

    info!(
        business_id = %business.id,
        business_name = %business.name,
        created_by = %auth.user_id,
        "Business created"
    );

    let populated = repo
        .find_with_owner(business.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created business".to_string()))?;

    Ok(populated.into())
}

/// List businesses.
///
/// GET /api/businesses[?mine=true]
pub async fn list_businesses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListBusinessesQuery>,
) -> Result<Json<Vec<BusinessResponse>>, ApiError> {
    let repo = BusinessRepository::new(state.pool.clone());

    let owner_filter = query.mine.unwrap_or(false).then_some(auth.user_id);
    let businesses = repo.list_with_owner(owner_filter).await?;

    Ok(Json(businesses.into_iter().map(Into::into).collect()))
}

/// Get a single business by ID.
///
/// GET /api/businesses/:id
pub async fn get_business(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let id = parse_id(&id, "business ID")?;
    let repo = BusinessRepository::new(state.pool.clone());

    let business = repo
        .find_with_owner(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))?;

    Ok(Json(business.into()))
}

/// Update a business.
///
/// PUT /api/businesses/:id
pub async fn update_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBusinessRequest>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let id = parse_id(&id, "business ID")?;
    request.validate()?;

    let business_type = match request.business_type.as_deref() {
        Some(raw) => Some(BusinessType::from_str(raw).map_err(|_| {
            ApiError::Validation(format!(
                "Invalid business type. Must be one of: {}",
                BusinessType::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?),
        None => None,
    };

    let repo = BusinessRepository::new(state.pool.clone());
    if repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let updated = repo
        .update(
            id,
            request.name.as_deref(),
            business_type.map(BusinessTypeDb::from),
            request.description.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))?;

    info!(business_id = %updated.id, user_id = %auth.user_id, "Business updated");

    let populated = repo
        .find_with_owner(updated.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated business".to_string()))?;

    Ok(Json(populated.into()))
}

/// Delete a business.
///
/// DELETE /api/businesses/:id
///
/// Only the owning super admin or a global admin may delete.
pub async fn delete_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "business ID")?;
    let repo = BusinessRepository::new(state.pool.clone());

    let business = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))?;

    if business.super_admin_user_id != auth.user_id && !auth.role.is_admin() {
        return Err(ApiError::Forbidden(
            "Unauthorized to delete this business".to_string(),
        ));
    }

    let deleted = repo
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))?;

    // Stored logo is removed best effort after the row is gone
    if let Some(image) = &deleted.image {
        state.uploads.remove(image).await;
    }

    info!(business_id = %id, user_id = %auth.user_id, "Business deleted");

    Ok(Json(json!({ "message": "Business deleted successfully" })))
}
