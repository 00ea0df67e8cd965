//! Project membership repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ProjectMembershipEntity, ProjectMembershipWithRefsEntity};
use crate::metrics::QueryTimer;

const WITH_REFS_SELECT: &str = r#"
    SELECT
        m.id,
        m.project_id, p.project_name,
        m.user_id, u.full_name AS user_full_name, u.email AS user_email,
        m.role_id, r.name AS role_name, r.scope AS role_scope,
        m.created_at, m.updated_at
    FROM project_memberships m
    JOIN projects p ON m.project_id = p.id
    JOIN users u ON m.user_id = u.id
    JOIN roles r ON m.role_id = r.id
"#;

/// Repository for project membership operations.
#[derive(Clone)]
pub struct ProjectMembershipRepository {
    pool: PgPool,
}

impl ProjectMembershipRepository {
    /// Creates a new ProjectMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new project membership.
    pub async fn create(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<ProjectMembershipEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_project_membership");
        let result = sqlx::query_as::<_, ProjectMembershipEntity>(
            r#"
            INSERT INTO project_memberships (project_id, user_id, role_id)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, user_id, role_id, created_at, updated_at
            "#,
        )
        .bind(project_id)
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
    ) -> Result<Option<ProjectMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_membership_by_id");
        let result = sqlx::query_as::<_, ProjectMembershipEntity>(
            r#"
            SELECT id, project_id, user_id, role_id, created_at, updated_at
            FROM project_memberships
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
    ) -> Result<Option<ProjectMembershipWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_membership_with_refs");
        let result = sqlx::query_as::<_, ProjectMembershipWithRefsEntity>(&format!(
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
        project_id: Option<Uuid>,
        user_id: Option<Uuid>,
        role_id: Option<Uuid>,
    ) -> Result<Vec<ProjectMembershipWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_project_memberships");
        let result = sqlx::query_as::<_, ProjectMembershipWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE ($1::uuid IS NULL OR m.project_id = $1)
              AND ($2::uuid IS NULL OR m.user_id = $2)
              AND ($3::uuid IS NULL OR m.role_id = $3)
            ORDER BY m.created_at DESC"#
        ))
        .bind(project_id)
        .bind(user_id)
        .bind(role_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the membership row for a (project, user) pair, optionally
    /// excluding one row (self-exclusion on update).
    pub async fn find_by_project_and_user(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<ProjectMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_membership_by_pair");
        let result = sqlx::query_as::<_, ProjectMembershipEntity>(
            r#"
            SELECT id, project_id, user_id, role_id, created_at, updated_at
            FROM project_memberships
            WHERE project_id = $1 AND user_id = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Of the given user IDs, return those holding a membership in the project.
    pub async fn members_among(
        &self,
        project_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("project_members_among");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM project_memberships
            WHERE project_id = $1 AND user_id = ANY($2)
            "#,
        )
        .bind(project_id)
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a membership; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        project_id: Option<Uuid>,
        user_id: Option<Uuid>,
        role_id: Option<Uuid>,
    ) -> Result<Option<ProjectMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_project_membership");
        let result = sqlx::query_as::<_, ProjectMembershipEntity>(
            r#"
            UPDATE project_memberships
            SET project_id = COALESCE($2, project_id),
                user_id = COALESCE($3, user_id),
                role_id = COALESCE($4, role_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id, project_id, user_id, role_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(project_id)
        .bind(user_id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a membership.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_project_membership");
        let result = sqlx::query("DELETE FROM project_memberships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
