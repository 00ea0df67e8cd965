//! JWT authentication middleware.
//!
//! Every resource route requires a valid bearer token; admin routes
//! additionally require the global admin role.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::user::GlobalRole;
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use shared::jwt::JwtConfig;

/// Authenticated caller information extracted from the JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject claim.
    pub user_id: Uuid,
    /// Coarse global role from the token.
    pub role: GlobalRole,
}

impl AuthUser {
    /// Validates an access token and returns the caller's identity.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;
        let role = GlobalRole::from_str(&claims.role)
            .map_err(|_| "Invalid role in token".to_string())?;

        Ok(AuthUser { user_id, role })
    }

    /// Creates a JwtConfig from the application JWT settings.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> JwtConfig {
        JwtConfig::with_leeway(
            &config.secret,
            config.access_token_expiry_secs,
            config.leeway_secs,
        )
    }
}

/// Middleware that requires a valid bearer token.
///
/// The authenticated caller is stored in request extensions for use by
/// downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("No token, authorization denied");
        }
    };

    let jwt_config = AuthUser::create_jwt_config(&state.config.jwt);

    match AuthUser::validate(&jwt_config, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Token is not valid")
        }
    }
}

/// Middleware that requires a valid bearer token with the admin role.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("No token, authorization denied");
        }
    };

    let jwt_config = AuthUser::create_jwt_config(&state.config.jwt);

    let auth = match AuthUser::validate(&jwt_config, token) {
        Ok(auth) => auth,
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            return unauthorized_response("Token is not valid");
        }
    };

    if !auth.role.is_admin() {
        return forbidden_response("Admin access required");
    }

    req.extensions_mut().insert(auth);
    next.run(req).await
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}

fn forbidden_response(message: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "message": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig::with_leeway("test_secret_for_auth_middleware", 3600, 0)
    }

    #[test]
    fn test_validate_accepts_valid_token() {
        let config = test_jwt_config();
        let user_id = Uuid::new_v4();
        let (token, _) = config.generate_access_token(user_id, "admin").unwrap();

        let auth = AuthUser::validate(&config, &token).unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.role, GlobalRole::Admin);
    }

    #[test]
    fn test_validate_rejects_garbage_token() {
        let config = test_jwt_config();
        assert!(AuthUser::validate(&config, "garbage").is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_role() {
        let config = test_jwt_config();
        let user_id = Uuid::new_v4();
        let (token, _) = config.generate_access_token(user_id, "superuser").unwrap();

        assert!(AuthUser::validate(&config, &token).is_err());
    }
}
