//! Milestone repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MilestoneEntity, MilestoneWithProjectEntity, ProgressStatusDb};
use crate::metrics::QueryTimer;

const WITH_PROJECT_SELECT: &str = r#"
    SELECT
        m.id,
        m.project_id, p.project_name, p.business_id AS project_business_id,
        m.name, m.description, m.due_date, m.status, m.assigned_to,
        m.created_at, m.updated_at
    FROM milestones m
    JOIN projects p ON m.project_id = p.id
"#;

/// Repository for milestone-related database operations.
#[derive(Clone)]
pub struct MilestoneRepository {
    pool: PgPool,
}

impl MilestoneRepository {
    /// Creates a new MilestoneRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new milestone.
    pub async fn create(
        &self,
        project_id: Uuid,
        name: &str,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        status: ProgressStatusDb,
        assigned_to: &[Uuid],
    ) -> Result<MilestoneEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_milestone");
        let result = sqlx::query_as::<_, MilestoneEntity>(
            r#"
            INSERT INTO milestones (project_id, name, description, due_date, status, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, name, description, due_date, status, assigned_to, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(name)
        .bind(description)
        .bind(due_date)
        .bind(status)
        .bind(assigned_to)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a milestone by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MilestoneEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_milestone_by_id");
        let result = sqlx::query_as::<_, MilestoneEntity>(
            r#"
            SELECT id, project_id, name, description, due_date, status, assigned_to, created_at, updated_at
            FROM milestones
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a milestone by ID with the project expanded.
    pub async fn find_with_project(
        &self,
        id: Uuid,
    ) -> Result<Option<MilestoneWithProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_milestone_with_project");
        let result = sqlx::query_as::<_, MilestoneWithProjectEntity>(&format!(
            "{WITH_PROJECT_SELECT} WHERE m.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List milestones of a project, newest first.
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<MilestoneWithProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_milestones");
        let result = sqlx::query_as::<_, MilestoneWithProjectEntity>(&format!(
            "{WITH_PROJECT_SELECT} WHERE m.project_id = $1 ORDER BY m.created_at DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a milestone; absent fields keep their current values.
    ///
    /// The assignee list is replaced wholesale when provided.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        status: Option<ProgressStatusDb>,
        assigned_to: Option<&[Uuid]>,
    ) -> Result<Option<MilestoneEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_milestone");
        let result = sqlx::query_as::<_, MilestoneEntity>(
            r#"
            UPDATE milestones
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                status = COALESCE($5, status),
                assigned_to = COALESCE($6, assigned_to),
                updated_at = now()
            WHERE id = $1
            RETURNING id, project_id, name, description, due_date, status, assigned_to, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(due_date)
        .bind(status)
        .bind(assigned_to)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a milestone.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_milestone");
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
