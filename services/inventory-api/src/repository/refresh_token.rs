// /apotek-inventory/services/inventory-api/src/repository/refresh_token.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::RefreshToken;
use crate::utils::error::AppResult;

/// Repository untuk lifecycle refresh token
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Simpan refresh token baru untuk user
    pub async fn create(
        &self,
        user_id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        let refresh_token = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at, is_revoked, created_at, updated_at)
            VALUES ($1, $2, $3, false, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(refresh_token)
    }

    /// Cari token yang masih berlaku: belum dicabut dan belum kedaluwarsa.
    /// Status aktif user diperiksa terpisah oleh pemanggil.
    pub async fn find_valid(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let refresh_token = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT * FROM refresh_tokens
            WHERE token = $1 AND is_revoked = false AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(refresh_token)
    }

    /// Cabut satu token; idempoten (token tak dikenal bukan error)
    pub async fn revoke(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = true, updated_at = NOW()
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Cabut semua token milik user (logout dari semua perangkat)
    pub async fn revoke_all_for_user(&self, user_id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = true, updated_at = NOW()
            WHERE user_id = $1 AND is_revoked = false
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Bersihkan token kedaluwarsa atau yang sudah dicabut
    pub async fn cleanup_expired(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE expires_at < NOW() OR is_revoked = true
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
