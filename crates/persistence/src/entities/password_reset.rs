//! Password reset code entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the password_reset_codes table.
///
/// One row per email; a re-request overwrites the previous code.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetCodeEntity {
    pub email: String,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
