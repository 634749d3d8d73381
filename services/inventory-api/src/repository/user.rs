// /apotek-inventory/services/inventory-api/src/repository/user.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{UpdateUserRequest, User, UserPublic};
use crate::utils::error::{AppError, AppResult};

/// Repository untuk operasi database terkait user
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Membuat user baru; password sudah berupa hash
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        id_karyawan: Option<i32>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password, role, is_active, id_karyawan, created_at, updated_at)
            VALUES ($1, $2, $3, $4, true, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(id_karyawan)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// User aktif untuk pemeriksaan ulang di middleware autentikasi
    pub async fn find_active_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = true")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// Daftar user dengan paginasi, tanpa kolom password
    pub async fn find_all(&self, page: u32, limit: u32) -> AppResult<(Vec<UserPublic>, i64)> {
        let offset = (page - 1) * limit;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let users = sqlx::query_as::<_, UserPublic>(
            r#"
            SELECT id, username, email, role, is_active, id_karyawan, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((users, total))
    }

    /// Update user dari patch; hanya field yang terisi yang ikut di-set
    pub async fn update(&self, id: i32, patch: &UpdateUserRequest) -> AppResult<Option<User>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest("No valid fields to update".to_string()));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = NOW()");

        if let Some(ref username) = patch.username {
            qb.push(", username = ");
            qb.push_bind(username);
        }
        if let Some(ref email) = patch.email {
            qb.push(", email = ");
            qb.push_bind(email);
        }
        if let Some(ref role) = patch.role {
            qb.push(", role = ");
            qb.push_bind(role);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ");
            qb.push_bind(is_active);
        }
        if let Some(id_karyawan) = patch.id_karyawan {
            qb.push(", id_karyawan = ");
            qb.push_bind(id_karyawan);
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        let user = qb
            .build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    /// Soft delete: user tidak pernah dihapus permanen
    pub async fn soft_delete(&self, id: i32) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
