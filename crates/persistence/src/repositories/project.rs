//! Project repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ProgressStatusDb, ProjectEntity, ProjectWithRefsEntity};
use crate::metrics::QueryTimer;

const WITH_REFS_SELECT: &str = r#"
    SELECT
        p.id,
        p.business_id, b.name AS business_name,
        p.team_id, t.name AS team_name,
        p.project_name, p.description, p.status,
        p.created_at, p.updated_at
    FROM projects p
    JOIN businesses b ON p.business_id = b.id
    JOIN teams t ON p.team_id = t.id
"#;

/// Repository for project-related database operations.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new project.
    pub async fn create(
        &self,
        business_id: Uuid,
        team_id: Uuid,
        project_name: &str,
        description: Option<&str>,
        status: ProgressStatusDb,
    ) -> Result<ProjectEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_project");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            INSERT INTO projects (business_id, team_id, project_name, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, business_id, team_id, project_name, description, status, created_at, updated_at
            "#,
        )
        .bind(business_id)
        .bind(team_id)
        .bind(project_name)
        .bind(description)
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_by_id");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT id, business_id, team_id, project_name, description, status, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a project by ID with references expanded.
    pub async fn find_with_refs(
        &self,
        id: Uuid,
    ) -> Result<Option<ProjectWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_with_refs");
        let result = sqlx::query_as::<_, ProjectWithRefsEntity>(&format!(
            "{WITH_REFS_SELECT} WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List projects with optional filters.
    pub async fn list_with_refs(
        &self,
        business_id: Option<Uuid>,
        team_id: Option<Uuid>,
        status: Option<ProgressStatusDb>,
    ) -> Result<Vec<ProjectWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_projects");
        let result = sqlx::query_as::<_, ProjectWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE ($1::uuid IS NULL OR p.business_id = $1)
              AND ($2::uuid IS NULL OR p.team_id = $2)
              AND ($3::progress_status IS NULL OR p.status = $3)
            ORDER BY p.created_at DESC"#
        ))
        .bind(business_id)
        .bind(team_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a project by (business, name), optionally excluding one row.
    pub async fn find_by_business_and_name(
        &self,
        business_id: Uuid,
        project_name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_by_business_and_name");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT id, business_id, team_id, project_name, description, status, created_at, updated_at
            FROM projects
            WHERE business_id = $1 AND project_name = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(business_id)
        .bind(project_name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a project; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        business_id: Option<Uuid>,
        team_id: Option<Uuid>,
        project_name: Option<&str>,
        description: Option<&str>,
        status: Option<ProgressStatusDb>,
    ) -> Result<Option<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_project");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            UPDATE projects
            SET business_id = COALESCE($2, business_id),
                team_id = COALESCE($3, team_id),
                project_name = COALESCE($4, project_name),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                updated_at = now()
            WHERE id = $1
            RETURNING id, business_id, team_id, project_name, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(business_id)
        .bind(team_id)
        .bind(project_name)
        .bind(description)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a project. Dependent rows are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_project");
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
