//! Business membership repository.
//!
//! The (business_id, user_id) pair is unique; a 23505 violation from the
//! storage layer is the authoritative duplicate signal alongside the
//! handler-level pre-check.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    BusinessMembershipEntity, BusinessMembershipWithRefsEntity, MembershipStatusDb,
};
use crate::metrics::QueryTimer;

const WITH_REFS_SELECT: &str = r#"
    SELECT
        m.id,
        m.business_id, b.name AS business_name,
        m.user_id, u.full_name AS user_full_name, u.email AS user_email,
        m.role_id, r.name AS role_name, r.scope AS role_scope,
        m.status, m.created_at, m.updated_at
    FROM business_memberships m
    JOIN businesses b ON m.business_id = b.id
    JOIN users u ON m.user_id = u.id
    JOIN roles r ON m.role_id = r.id
"#;

/// Repository for business membership operations.
#[derive(Clone)]
pub struct BusinessMembershipRepository {
    pool: PgPool,
}

impl BusinessMembershipRepository {
    /// Creates a new BusinessMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new business membership.
    pub async fn create(
        &self,
        business_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
        status: MembershipStatusDb,
    ) -> Result<BusinessMembershipEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_business_membership");
        let result = sqlx::query_as::<_, BusinessMembershipEntity>(
            r#"
            INSERT INTO business_memberships (business_id, user_id, role_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, business_id, user_id, role_id, status, created_at, updated_at
            "#,
        )
        .bind(business_id)
        .bind(user_id)
        .bind(role_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a membership by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BusinessMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_business_membership_by_id");
        let result = sqlx::query_as::<_, BusinessMembershipEntity>(
            r#"
            SELECT id, business_id, user_id, role_id, status, created_at, updated_at
            FROM business_memberships
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a membership by ID with all references expanded.
    pub async fn find_with_refs(
        &self,
        id: Uuid,
    ) -> Result<Option<BusinessMembershipWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_business_membership_with_refs");
        let result = sqlx::query_as::<_, BusinessMembershipWithRefsEntity>(&format!(
            "{WITH_REFS_SELECT} WHERE m.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List memberships with optional filters.
    pub async fn list_with_refs(
        &self,
        business_id: Option<Uuid>,
        user_id: Option<Uuid>,
        role_id: Option<Uuid>,
        status: Option<MembershipStatusDb>,
    ) -> Result<Vec<BusinessMembershipWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_business_memberships");
        let result = sqlx::query_as::<_, BusinessMembershipWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE ($1::uuid IS NULL OR m.business_id = $1)
              AND ($2::uuid IS NULL OR m.user_id = $2)
              AND ($3::uuid IS NULL OR m.role_id = $3)
              AND ($4::membership_status IS NULL OR m.status = $4)
            ORDER BY m.created_at DESC"#
        ))
        .bind(business_id)
        .bind(user_id)
        .bind(role_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the membership row for a (business, user) pair, optionally
    /// excluding one row (self-exclusion on update).
    pub async fn find_by_business_and_user(
        &self,
        business_id: Uuid,
        user_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<BusinessMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_business_membership_by_pair");
        let result = sqlx::query_as::<_, BusinessMembershipEntity>(
            r#"
            SELECT id, business_id, user_id, role_id, status, created_at, updated_at
            FROM business_memberships
            WHERE business_id = $1 AND user_id = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(business_id)
        .bind(user_id)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a membership; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        business_id: Option<Uuid>,
        user_id: Option<Uuid>,
        role_id: Option<Uuid>,
        status: Option<MembershipStatusDb>,
    ) -> Result<Option<BusinessMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_business_membership");
        let result = sqlx::query_as::<_, BusinessMembershipEntity>(
            r#"
            UPDATE business_memberships
            SET business_id = COALESCE($2, business_id),
                user_id = COALESCE($3, user_id),
                role_id = COALESCE($4, role_id),
                status = COALESCE($5, status),
                updated_at = now()
            WHERE id = $1
            RETURNING id, business_id, user_id, role_id, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(business_id)
        .bind(user_id)
        .bind(role_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a membership.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_business_membership");
        let result = sqlx::query("DELETE FROM business_memberships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
