//! Permission repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PermissionEntity;
use crate::metrics::QueryTimer;

/// Repository for permission catalog operations.
#[derive(Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Creates a new PermissionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new permission.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<PermissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_permission");
        let result = sqlx::query_as::<_, PermissionEntity>(
            r#"
            INSERT INTO permissions (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a permission by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_permission_by_id");
        let result = sqlx::query_as::<_, PermissionEntity>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a permission by name, optionally excluding one row.
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<PermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_permission_by_name");
        let result = sqlx::query_as::<_, PermissionEntity>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all permissions.
    pub async fn list(&self) -> Result<Vec<PermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_permissions");
        let result = sqlx::query_as::<_, PermissionEntity>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a permission; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<PermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_permission");
        let result = sqlx::query_as::<_, PermissionEntity>(
            r#"
            UPDATE permissions
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a permission.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_permission");
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
