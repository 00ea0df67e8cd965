//! Team membership repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{TeamMembershipEntity, TeamMembershipWithRefsEntity};
use crate::metrics::QueryTimer;

const WITH_REFS_SELECT: &str = r#"
    SELECT
        m.id,
        m.team_id, t.name AS team_name,
        m.user_id, u.full_name AS user_full_name, u.email AS user_email,
        m.role_id, r.name AS role_name, r.scope AS role_scope,
        m.created_at, m.updated_at
    FROM team_memberships m
    JOIN teams t ON m.team_id = t.id
    JOIN users u ON m.user_id = u.id
    JOIN roles r ON m.role_id = r.id
"#;

/// Repository for team membership operations.
#[derive(Clone)]
pub struct TeamMembershipRepository {
    pool: PgPool,
}

impl TeamMembershipRepository {
    /// Creates a new TeamMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new team membership.
    pub async fn create(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<TeamMembershipEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_team_membership");
        let result = sqlx::query_as::<_, TeamMembershipEntity>(
            r#"
            INSERT INTO team_memberships (team_id, user_id, role_id)
            VALUES ($1, $2, $3)
            RETURNING id, team_id, user_id, role_id, created_at, updated_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a membership by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<TeamMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_membership_by_id");
        let result = sqlx::query_as::<_, TeamMembershipEntity>(
            r#"
            SELECT id, team_id, user_id, role_id, created_at, updated_at
            FROM team_memberships
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
    ) -> Result<Option<TeamMembershipWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_membership_with_refs");
        let result = sqlx::query_as::<_, TeamMembershipWithRefsEntity>(&format!(
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
        team_id: Option<Uuid>,
        user_id: Option<Uuid>,
        role_id: Option<Uuid>,
    ) -> Result<Vec<TeamMembershipWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_team_memberships");
        let result = sqlx::query_as::<_, TeamMembershipWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE ($1::uuid IS NULL OR m.team_id = $1)
              AND ($2::uuid IS NULL OR m.user_id = $2)
              AND ($3::uuid IS NULL OR m.role_id = $3)
            ORDER BY m.created_at DESC"#
        ))
        .bind(team_id)
        .bind(user_id)
        .bind(role_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the membership row for a (team, user) pair, optionally
    /// excluding one row (self-exclusion on update).
    pub async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<TeamMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_membership_by_pair");
        let result = sqlx::query_as::<_, TeamMembershipEntity>(
            r#"
            SELECT id, team_id, user_id, role_id, created_at, updated_at
            FROM team_memberships
            WHERE team_id = $1 AND user_id = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(team_id)
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
        team_id: Option<Uuid>,
        user_id: Option<Uuid>,
        role_id: Option<Uuid>,
    ) -> Result<Option<TeamMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_team_membership");
        let result = sqlx::query_as::<_, TeamMembershipEntity>(
            r#"
            UPDATE team_memberships
            SET team_id = COALESCE($2, team_id),
                user_id = COALESCE($3, user_id),
                role_id = COALESCE($4, role_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id, team_id, user_id, role_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(team_id)
        .bind(user_id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a membership.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_team_membership");
        let result = sqlx::query("DELETE FROM team_memberships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
