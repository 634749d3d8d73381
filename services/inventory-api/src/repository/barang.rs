// /apotek-inventory/services/inventory-api/src/repository/barang.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{Barang, BarangQuery, CreateBarangRequest, UpdateBarangRequest};
use crate::utils::error::{AppError, AppResult};

/// Repository untuk master barang
pub struct BarangRepository {
    pool: PgPool,
}

impl BarangRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateBarangRequest) -> AppResult<Barang> {
        let barang = sqlx::query_as::<_, Barang>(
            r#"
            INSERT INTO barang (nama_barang, satuan, jenis, stok_minimal, lokasi, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&request.nama_barang)
        .bind(&request.satuan)
        .bind(&request.jenis)
        .bind(request.stok_minimal.unwrap_or(0))
        .bind(&request.lokasi)
        .fetch_one(&self.pool)
        .await?;

        Ok(barang)
    }

    pub async fn find_by_id(&self, id_barang: i32) -> AppResult<Option<Barang>> {
        let barang = sqlx::query_as::<_, Barang>("SELECT * FROM barang WHERE id_barang = $1")
            .bind(id_barang)
            .fetch_optional(&self.pool)
            .await?;

        Ok(barang)
    }

    pub async fn find_all(
        &self,
        page: u32,
        limit: u32,
        filter: &BarangQuery,
    ) -> AppResult<(Vec<Barang>, i64)> {
        let offset = (page - 1) * limit;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM barang WHERE 1=1");
        Self::push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM barang WHERE 1=1");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb.build_query_as::<Barang>().fetch_all(&self.pool).await?;

        Ok((rows, total))
    }

    fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a BarangQuery) {
        if let Some(ref jenis) = filter.jenis {
            qb.push(" AND jenis = ");
            qb.push_bind(jenis);
        }
        if let Some(ref satuan) = filter.satuan {
            qb.push(" AND satuan = ");
            qb.push_bind(satuan);
        }
    }

    /// Cari barang berdasarkan nama atau lokasi
    pub async fn search(
        &self,
        search_term: &str,
        page: u32,
        limit: u32,
    ) -> AppResult<(Vec<Barang>, i64)> {
        let offset = (page - 1) * limit;
        let pattern = format!("%{}%", search_term);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM barang WHERE nama_barang ILIKE $1 OR lokasi ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Barang>(
            r#"
            SELECT * FROM barang
            WHERE nama_barang ILIKE $1 OR lokasi ILIKE $1
            ORDER BY nama_barang
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

    pub async fn update(&self, id_barang: i32, patch: &UpdateBarangRequest) -> AppResult<Option<Barang>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE barang SET updated_at = NOW()");

        if let Some(ref nama_barang) = patch.nama_barang {
            qb.push(", nama_barang = ");
            qb.push_bind(nama_barang);
        }
        if let Some(ref satuan) = patch.satuan {
            qb.push(", satuan = ");
            qb.push_bind(satuan);
        }
        if let Some(ref jenis) = patch.jenis {
            qb.push(", jenis = ");
            qb.push_bind(jenis);
        }
        if let Some(stok_minimal) = patch.stok_minimal {
            qb.push(", stok_minimal = ");
            qb.push_bind(stok_minimal);
        }
        if let Some(ref lokasi) = patch.lokasi {
            qb.push(", lokasi = ");
            qb.push_bind(lokasi);
        }

        qb.push(" WHERE id_barang = ");
        qb.push_bind(id_barang);
        qb.push(" RETURNING *");

        let barang = qb
            .build_query_as::<Barang>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(barang)
    }

    /// Barang dihapus permanen (bukan soft delete)
    pub async fn delete(&self, id_barang: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM barang WHERE id_barang = $1")
            .bind(id_barang)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
