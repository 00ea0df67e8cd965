//! Authenticated-caller extractor.
//!
//! Provides an Axum extractor for the bearer-token identity. Routes behind
//! the auth middleware read it from request extensions; the extractor also
//! validates the token directly so handlers work without the layer.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::user::GlobalRole;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser as AuthUserData;

/// Authenticated caller information from the JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject claim.
    pub user_id: Uuid,
    /// Coarse global role from the token.
    pub role: GlobalRole,
}

impl From<AuthUserData> for AuthUser {
    fn from(data: AuthUserData) -> Self {
        Self {
            user_id: data.user_id,
            role: data.role,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Auth middleware may already have validated the token
        if let Some(auth) = parts.extensions.get::<AuthUserData>() {
            return Ok(auth.clone().into());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "No token, authorization denied".to_string(),
            ));
        }

        let token = &auth_header[7..];
        let jwt_config = AuthUserData::create_jwt_config(&state.config.jwt);

        let auth_data = AuthUserData::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Token is not valid".to_string()))?;

        Ok(auth_data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_from_data() {
        let data = AuthUserData {
            user_id: Uuid::new_v4(),
            role: GlobalRole::Admin,
        };
        let auth: AuthUser = data.clone().into();
        assert_eq!(auth.user_id, data.user_id);
        assert_eq!(auth.role, GlobalRole::Admin);
    }

    #[test]
    fn test_auth_user_clone() {
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            role: GlobalRole::User,
        };
        let cloned = auth.clone();
        assert_eq!(auth.user_id, cloned.user_id);
        assert_eq!(auth.role, cloned.role);
    }
}
