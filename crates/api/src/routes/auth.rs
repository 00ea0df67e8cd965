//! Authentication routes: signup, login and the password-reset flow.
//!
//! Reset codes are stored hashed with a 10-minute expiry, enforced when the
//! code is verified. Verification consumes the code; requesting a new code
//! overwrites the previous one.

use axum::{extract::State, http::StatusCode, Json};
use persistence::repositories::{PasswordResetRepository, UserRepository};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use domain::models::user::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest,
    UserProfile, VerifyOtpRequest,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use shared::{password, reset_code};

/// Register a new user account.
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    if repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = repo
        .create(&request.full_name, &request.email, &password_hash)
        .await?;

    let jwt_config = AuthUser::create_jwt_config(&state.config.jwt);
    let role: domain::models::user::GlobalRole = user.role.into();
    let (token, _) = jwt_config
        .generate_access_token(user.id, role.as_str())
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    info!(user_id = %user.id, email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile::from(&user),
        }),
    ))
}

/// Authenticate with email and password.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    let user = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid credentials".to_string()))?;

    let matches = password::verify_password(&request.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !matches {
        return Err(ApiError::Validation("Invalid credentials".to_string()));
    }

    let jwt_config = AuthUser::create_jwt_config(&state.config.jwt);
    let role: domain::models::user::GlobalRole = user.role.into();
    let (token, _) = jwt_config
        .generate_access_token(user.id, role.as_str())
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

/// Request a password-reset code by email.
///
/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let code = reset_code::generate_code();
    let codes = PasswordResetRepository::new(state.pool.clone());
    codes
        .upsert(
            &user.email,
            &reset_code::hash_code(&code),
            reset_code::expiry_from_now(),
        )
        .await?;

    state
        .email
        .send_reset_code(&user.email, &code)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;

    info!(email = %user.email, "Password reset code issued");

    Ok(Json(json!({ "message": "OTP sent to your email" })))
}

/// Verify a password-reset code. A successful check consumes the code.
///
/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    let codes = PasswordResetRepository::new(state.pool.clone());
    let stored = codes.find_by_email(&request.email).await?;

    let valid = stored
        .map(|entry| reset_code::verify_code(&request.otp, &entry.code_hash, entry.expires_at))
        .unwrap_or(false);

    if !valid {
        return Err(ApiError::Validation("Invalid or expired OTP".to_string()));
    }

    codes.delete(&request.email).await?;

    Ok(Json(json!({ "message": "OTP verified successfully" })))
}

/// Reset a password by email.
///
/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_hash = password::hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
    users.update_password(&user.email, &password_hash).await?;

    state
        .email
        .send_password_changed(&user.email, &user.full_name)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;

    info!(email = %user.email, "Password reset");

    Ok(Json(json!({ "message": "Password reset successfully" })))
}
