// /apotek-inventory/services/inventory-api/src/repository/permission.rs

use sqlx::PgPool;

use crate::models::Permission;
use crate::utils::error::AppResult;

/// Repository read-only untuk katalog permission.
/// Route guard memakai role; tabel ini hanya katalog yang bisa di-query.
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions ORDER BY resource, action",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    pub async fn find_by_role(&self, role: &str) -> AppResult<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.*
            FROM permissions p
            JOIN role_permissions rp ON p.id = rp.permission_id
            WHERE rp.role = $1
            ORDER BY p.resource, p.action
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }
}
