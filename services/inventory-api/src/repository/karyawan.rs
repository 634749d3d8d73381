// /apotek-inventory/services/inventory-api/src/repository/karyawan.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{CreateKaryawanRequest, Karyawan, KaryawanQuery, UpdateKaryawanRequest};
use crate::utils::error::{AppError, AppResult};

/// Repository untuk data karyawan
pub struct KaryawanRepository {
    pool: PgPool,
}

impl KaryawanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateKaryawanRequest) -> AppResult<Karyawan> {
        let karyawan = sqlx::query_as::<_, Karyawan>(
            r#"
            INSERT INTO karyawan (nama_karyawan, jabatan, nip, no_hp, alamat, status_aktif, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&request.nama_karyawan)
        .bind(&request.jabatan)
        .bind(&request.nip)
        .bind(&request.no_hp)
        .bind(&request.alamat)
        .bind(request.status_aktif.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(karyawan)
    }

    pub async fn find_by_id(&self, id_karyawan: i32) -> AppResult<Option<Karyawan>> {
        let karyawan =
            sqlx::query_as::<_, Karyawan>("SELECT * FROM karyawan WHERE id_karyawan = $1")
                .bind(id_karyawan)
                .fetch_optional(&self.pool)
                .await?;

        Ok(karyawan)
    }

    pub async fn find_by_nip(&self, nip: &str) -> AppResult<Option<Karyawan>> {
        let karyawan = sqlx::query_as::<_, Karyawan>("SELECT * FROM karyawan WHERE nip = $1")
            .bind(nip)
            .fetch_optional(&self.pool)
            .await?;

        Ok(karyawan)
    }

    pub async fn find_all(
        &self,
        page: u32,
        limit: u32,
        filter: &KaryawanQuery,
    ) -> AppResult<(Vec<Karyawan>, i64)> {
        let offset = (page - 1) * limit;

        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM karyawan WHERE 1=1");
        if let Some(status_aktif) = filter.status_aktif {
            count_qb.push(" AND status_aktif = ");
            count_qb.push_bind(status_aktif);
        }

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM karyawan WHERE 1=1");
        if let Some(status_aktif) = filter.status_aktif {
            qb.push(" AND status_aktif = ");
            qb.push_bind(status_aktif);
        }
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb
            .build_query_as::<Karyawan>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Cari karyawan berdasarkan nama atau NIP
    pub async fn search(
        &self,
        search_term: &str,
        page: u32,
        limit: u32,
    ) -> AppResult<(Vec<Karyawan>, i64)> {
        let offset = (page - 1) * limit;
        let pattern = format!("%{}%", search_term);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM karyawan WHERE nama_karyawan ILIKE $1 OR nip ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Karyawan>(
            r#"
            SELECT * FROM karyawan
            WHERE nama_karyawan ILIKE $1 OR nip ILIKE $1
            ORDER BY nama_karyawan
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    pub async fn update(
        &self,
        id_karyawan: i32,
        patch: &UpdateKaryawanRequest,
    ) -> AppResult<Option<Karyawan>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE karyawan SET updated_at = NOW()");

        if let Some(ref nama_karyawan) = patch.nama_karyawan {
            qb.push(", nama_karyawan = ");
            qb.push_bind(nama_karyawan);
        }
        if let Some(ref jabatan) = patch.jabatan {
            qb.push(", jabatan = ");
            qb.push_bind(jabatan);
        }
        if let Some(ref nip) = patch.nip {
            qb.push(", nip = ");
            qb.push_bind(nip);
        }
        if let Some(ref no_hp) = patch.no_hp {
            qb.push(", no_hp = ");
            qb.push_bind(no_hp);
        }
        if let Some(ref alamat) = patch.alamat {
            qb.push(", alamat = ");
            qb.push_bind(alamat);
        }
        if let Some(status_aktif) = patch.status_aktif {
            qb.push(", status_aktif = ");
            qb.push_bind(status_aktif);
        }

        qb.push(" WHERE id_karyawan = ");
        qb.push_bind(id_karyawan);
        qb.push(" RETURNING *");

        let karyawan = qb
            .build_query_as::<Karyawan>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(karyawan)
    }

    /// Soft delete: tandai tidak aktif
    pub async fn soft_delete(&self, id_karyawan: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE karyawan SET status_aktif = false, updated_at = NOW() WHERE id_karyawan = $1",
        )
        .bind(id_karyawan)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard delete: hapus permanen dari database
    pub async fn hard_delete(&self, id_karyawan: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM karyawan WHERE id_karyawan = $1")
            .bind(id_karyawan)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
