//! Password reset code repository.
//!
//! One row per email. Requesting a new code overwrites the previous one;
//! expiry is enforced by the caller at verification time.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::PasswordResetCodeEntity;
use crate::metrics::QueryTimer;

/// Repository for password reset codes.
#[derive(Clone)]
pub struct PasswordResetRepository {
    pool: PgPool,
}

impl PasswordResetRepository {
    /// Creates a new PasswordResetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a code hash for an email, replacing any existing one.
    pub async fn upsert(
        &self,
        email: &str,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("upsert_password_reset_code");
        let result = sqlx::query(
            r#"
            INSERT INTO password_reset_codes (email, code_hash, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email)
            DO UPDATE SET code_hash = EXCLUDED.code_hash,
                          expires_at = EXCLUDED.expires_at,
                          created_at = now()
            "#,
        )
        .bind(email)
        .bind(code_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map(|_| ());
        timer.record();
        result
    }

    /// Find the stored code for an email.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PasswordResetCodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_password_reset_code");
        let result = sqlx::query_as::<_, PasswordResetCodeEntity>(
            r#"
            SELECT email, code_hash, expires_at, created_at
            FROM password_reset_codes
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove the stored code for an email (single use).
    pub async fn delete(&self, email: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_password_reset_code");
        let result = sqlx::query("DELETE FROM password_reset_codes WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
