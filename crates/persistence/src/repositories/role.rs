//! Role repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RoleEntity, RoleScopeDb};
use crate::metrics::QueryTimer;

/// Repository for role catalog operations.
#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Creates a new RoleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new role.
    pub async fn create(&self, name: &str, scope: RoleScopeDb) -> Result<RoleEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_role");
        let result = sqlx::query_as::<_, RoleEntity>(
            r#"
            INSERT INTO roles (name, scope)
            VALUES ($1, $2)
            RETURNING id, name, scope, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(scope)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a role by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RoleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_role_by_id");
        let result = sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, name, scope, created_at, updated_at
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a role by (name, scope), optionally excluding one row.
    pub async fn find_by_name_and_scope(
        &self,
        name: &str,
        scope: RoleScopeDb,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<RoleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_role_by_name_and_scope");
        let result = sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, name, scope, created_at, updated_at
            FROM roles
            WHERE name = $1 AND scope = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(name)
        .bind(scope)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all roles.
    pub async fn list(&self) -> Result<Vec<RoleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_roles");
        let result = sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, name, scope, created_at, updated_at
            FROM roles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a role; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        scope: Option<RoleScopeDb>,
    ) -> Result<Option<RoleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_role");
        let result = sqlx::query_as::<_, RoleEntity>(
            r#"
            UPDATE roles
            SET name = COALESCE($2, name),
                scope = COALESCE($3, scope),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, scope, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(scope)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a role.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_role");
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
