// /apotek-inventory/services/inventory-api/src/repository/supplier.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{CreateSupplierRequest, Supplier, UpdateSupplierRequest};
use crate::utils::error::{AppError, AppResult};

/// Repository untuk master supplier
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateSupplierRequest) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO supplier (nama_supplier, alamat, kontak, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&request.nama_supplier)
        .bind(&request.alamat)
        .bind(&request.kontak)
        .fetch_one(&self.pool)
        .await?;

        Ok(supplier)
    }

    pub async fn find_by_id(&self, id_supplier: i32) -> AppResult<Option<Supplier>> {
        let supplier =
            sqlx::query_as::<_, Supplier>("SELECT * FROM supplier WHERE id_supplier = $1")
                .bind(id_supplier)
                .fetch_optional(&self.pool)
                .await?;

        Ok(supplier)
    }

    pub async fn find_by_nama(&self, nama_supplier: &str) -> AppResult<Option<Supplier>> {
        let supplier =
            sqlx::query_as::<_, Supplier>("SELECT * FROM supplier WHERE nama_supplier = $1")
                .bind(nama_supplier)
                .fetch_optional(&self.pool)
                .await?;

        Ok(supplier)
    }

    pub async fn find_all(&self, page: u32, limit: u32) -> AppResult<(Vec<Supplier>, i64)> {
        let offset = (page - 1) * limit;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM supplier")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT * FROM supplier
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Cari supplier berdasarkan nama, alamat, atau kontak
    pub async fn search(
        &self,
        search_term: &str,
        page: u32,
        limit: u32,
    ) -> AppResult<(Vec<Supplier>, i64)> {
        let offset = (page - 1) * limit;
        let pattern = format!("%{}%", search_term);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM supplier
            WHERE nama_supplier ILIKE $1 OR alamat ILIKE $1 OR kontak ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT * FROM supplier
            WHERE nama_supplier ILIKE $1 OR alamat ILIKE $1 OR kontak ILIKE $1
            ORDER BY nama_supplier
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
        id_supplier: i32,
        patch: &UpdateSupplierRequest,
    ) -> AppResult<Option<Supplier>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE supplier SET updated_at = NOW()");

        if let Some(ref nama_supplier) = patch.nama_supplier {
            qb.push(", nama_supplier = ");
            qb.push_bind(nama_supplier);
        }
        if let Some(ref alamat) = patch.alamat {
            qb.push(", alamat = ");
            qb.push_bind(alamat);
        }
        if let Some(ref kontak) = patch.kontak {
            qb.push(", kontak = ");
            qb.push_bind(kontak);
        }

        qb.push(" WHERE id_supplier = ");
        qb.push_bind(id_supplier);
        qb.push(" RETURNING *");

        let supplier = qb
            .build_query_as::<Supplier>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    /// Supplier dihapus permanen (bukan soft delete)
    pub async fn delete(&self, id_supplier: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM supplier WHERE id_supplier = $1")
            .bind(id_supplier)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
