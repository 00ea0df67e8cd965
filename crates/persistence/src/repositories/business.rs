//! Business repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BusinessEntity, BusinessTypeDb, BusinessWithOwnerEntity};
use crate::metrics::QueryTimer;

const WITH_OWNER_SELECT: &str = r#"
    SELECT
        b.id, b.name, b.business_type, b.description, b.image, b.super_admin_user_id,
        u.full_name AS owner_full_name, u.email AS owner_email,
        b.created_at, b.updated_at
    FROM businesses b
    JOIN users u ON b.super_admin_user_id = u.id
"#;

/// Repository for business-related database operations.
#[derive(Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    /// Creates a new BusinessRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new business.
    pub async fn create(
        &self,
        name: &str,
        business_type: BusinessTypeDb,
        description: Option<&str>,
        image: Option<&str>,
        super_admin_user_id: Uuid,
    ) -> Result<BusinessEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_business");
        let result = sqlx::query_as::<_, BusinessEntity>(
            r#"
            INSERT INTO businesses (name, business_type, description, image, super_admin_user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, business_type, description, image, super_admin_user_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(business_type)
        .bind(description)
        .bind(image)
        .bind(super_admin_user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a business by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BusinessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_business_by_id");
        let result = sqlx::query_as::<_, BusinessEntity>(
            r#"
            SELECT id, name, business_type, description, image, super_admin_user_id, created_at, updated_at
            FROM businesses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a business by ID with the owner expanded.
    pub async fn find_with_owner(
        &self,
        id: Uuid,
    ) -> Result<Option<BusinessWithOwnerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_business_with_owner");
        let result = sqlx::query_as::<_, BusinessWithOwnerEntity>(&format!(
            "{WITH_OWNER_SELECT} WHERE b.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List businesses, optionally restricted to a single owner.
    pub async fn list_with_owner(
        &self,
        owner_id: Option<Uuid>,
    ) -> Result<Vec<BusinessWithOwnerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_businesses");
        let result = sqlx::query_as::<_, BusinessWithOwnerEntity>(&format!(
            "{WITH_OWNER_SELECT} WHERE ($1::uuid IS NULL OR b.super_admin_user_id = $1) ORDER BY b.created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a business; absent fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        business_type: Option<BusinessTypeDb>,
        description: Option<&str>,
    ) -> Result<Option<BusinessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_business");
        let result = sqlx::query_as::<_, BusinessEntity>(
            r#"
            UPDATE businesses
            SET name = COALESCE($2, name),
                business_type = COALESCE($3, business_type),
                description = COALESCE($4, description),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, business_type, description, image, super_admin_user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(business_type)
        .bind(description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a business, returning the deleted row for cleanup of any
    /// stored logo file. Dependent rows are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<Option<BusinessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_business");
        let result = sqlx::query_as::<_, BusinessEntity>(
            r#"
            DELETE FROM businesses
            WHERE id = $1
            RETURNING id, name, business_type, description, image, super_admin_user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
