//! Role/permission join repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RolePermissionEntity, RolePermissionWithRefsEntity};
use crate::metrics::QueryTimer;

const WITH_REFS_SELECT: &str = r#"
    SELECT
        rp.id,
        rp.role_id, r.name AS role_name, r.scope AS role_scope,
        rp.permission_id, p.name AS permission_name, p.description AS permission_description,
        rp.created_at, rp.updated_at
    FROM role_permissions rp
    JOIN roles r ON rp.role_id = r.id
    JOIN permissions p ON rp.permission_id = p.id
"#;

/// Repository for role/permission pair operations.
#[derive(Clone)]
pub struct RolePermissionRepository {
    pool: PgPool,
}

impl RolePermissionRepository {
    /// Creates a new RolePermissionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach a permission to a role.
    pub async fn create(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<RolePermissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_role_permission");
        let result = sqlx::query_as::<_, RolePermissionEntity>(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            VALUES ($1, $2)
            RETURNING id, role_id, permission_id, created_at, updated_at
            "#,
        )
        .bind(role_id)
        .bind(permission_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a role/permission pair by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<RolePermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_role_permission_by_id");
        let result = sqlx::query_as::<_, RolePermissionEntity>(
            r#"
            SELECT id, role_id, permission_id, created_at, updated_at
            FROM role_permissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a role/permission pair by ID with both references expanded.
    pub async fn find_with_refs(
        &self,
        id: Uuid,
    ) -> Result<Option<RolePermissionWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_role_permission_with_refs");
        let result = sqlx::query_as::<_, RolePermissionWithRefsEntity>(&format!(
            "{WITH_REFS_SELECT} WHERE rp.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List role/permission pairs with optional filters.
    pub async fn list_with_refs(
        &self,
        role_id: Option<Uuid>,
        permission_id: Option<Uuid>,
    ) -> Result<Vec<RolePermissionWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_role_permissions");
        let result = sqlx::query_as::<_, RolePermissionWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE ($1::uuid IS NULL OR rp.role_id = $1)
              AND ($2::uuid IS NULL OR rp.permission_id = $2)
            ORDER BY rp.created_at DESC"#
        ))
        .bind(role_id)
        .bind(permission_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an existing (role, permission) pair, optionally excluding one row.
    pub async fn find_pair(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<RolePermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_role_permission_pair");
        let result = sqlx::query_as::<_, RolePermissionEntity>(
            r#"
            SELECT id, role_id, permission_id, created_at, updated_at
            FROM role_permissions
            WHERE role_id = $1 AND permission_id = $2 AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(role_id)
        .bind(permission_id)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Returns true if any role references the given permission.
    pub async fn exists_for_permission(&self, permission_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("role_permission_exists_for_permission");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM role_permissions WHERE permission_id = $1)
            "#,
        )
        .bind(permission_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a role/permission pair; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        role_id: Option<Uuid>,
        permission_id: Option<Uuid>,
    ) -> Result<Option<RolePermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_role_permission");
        let result = sqlx::query_as::<_, RolePermissionEntity>(
            r#"
            UPDATE role_permissions
            SET role_id = COALESCE($2, role_id),
                permission_id = COALESCE($3, permission_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id, role_id, permission_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(role_id)
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a role/permission pair.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_role_permission");
        let result = sqlx::query("DELETE FROM role_permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
