//! Team repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{TeamEntity, TeamWithBusinessEntity};
use crate::metrics::QueryTimer;

const WITH_BUSINESS_SELECT: &str = r#"
    SELECT
        t.id, t.business_id, b.name AS business_name, t.name,
        t.created_at, t.updated_at
    FROM teams t
    JOIN businesses b ON t.business_id = b.id
"#;

/// Repository for team-related database operations.
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Creates a new TeamRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new team.
    pub async fn create(&self, business_id: Uuid, name: &str) -> Result<TeamEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_team");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            INSERT INTO teams (business_id, name)
            VALUES ($1, $2)
            RETURNING id, business_id, name, created_at, updated_at
            "#,
        )
        .bind(business_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a team by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_by_id");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, business_id, name, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a team by ID with the business expanded.
    pub async fn find_with_business(
        &self,
        id: Uuid,
    ) -> Result<Option<TeamWithBusinessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_with_business");
        let result = sqlx::query_as::<_, TeamWithBusinessEntity>(&format!(
            "{WITH_BUSINESS_SELECT} WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List teams, optionally filtered by business.
    pub async fn list_with_business(
        &self,
        business_id: Option<Uuid>,
    ) -> Result<Vec<TeamWithBusinessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_teams");
        let result = sqlx::query_as::<_, TeamWithBusinessEntity>(&format!(
            "{WITH_BUSINESS_SELECT} WHERE ($1::uuid IS NULL OR t.business_id = $1) ORDER BY t.created_at DESC"
        ))
        .bind(business_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a team by (business, name), optionally excluding one row.
    pub async fn find_by_business_and_name(
        &self,
        business_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_by_business_and_name");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, business_id, name, created_at, updated_at
            FROM teams
            WHERE business_id = $1 AND name = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(business_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a team; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        business_id: Option<Uuid>,
    ) -> Result<Option<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_team");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                business_id = COALESCE($3, business_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id, business_id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a team. Dependent rows are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_team");
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
