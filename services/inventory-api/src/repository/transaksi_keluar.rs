// /apotek-inventory/services/inventory-api/src/repository/transaksi_keluar.rs

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::models::{
    CreateDetailKeluarRequest, CreateTransaksiKeluarRequest, DetailTransaksiKeluar,
    TransaksiKeluar, TransaksiKeluarQuery, TransaksiKeluarWithDetails, UpdateDetailKeluarRequest,
    UpdateTransaksiKeluarRequest,
};
use crate::utils::error::{AppError, AppResult};

/// Repository untuk transaksi keluar.
/// Detail keluar hanya membawa barang dan jumlah; pengeluaran stok
/// bukan penjualan sehingga tidak ada harga satuan.
pub struct TransaksiKeluarRepository {
    pool: PgPool,
}

impl TransaksiKeluarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buat transaksi keluar beserta detailnya dalam satu unit atomik
    pub async fn create(
        &self,
        request: &CreateTransaksiKeluarRequest,
        id_user: i32,
    ) -> AppResult<TransaksiKeluarWithDetails> {
        let mut tx = self.pool.begin().await?;

        match Self::insert_with_details(&mut tx, request, id_user).await {
            Ok(result) => {
                tx.commit().await?;
                Ok(result)
            }
            Err(e) => {
                tx.rollback().await.ok();
                Err(e)
            }
        }
    }

    async fn insert_with_details(
        tx: &mut Transaction<'_, Postgres>,
        request: &CreateTransaksiKeluarRequest,
        id_user: i32,
    ) -> AppResult<TransaksiKeluarWithDetails> {
        let transaksi = sqlx::query_as::<_, TransaksiKeluar>(
            r#"
            INSERT INTO transaksi_keluar (tanggal_keluar, tujuan, id_user, keterangan, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(request.tanggal_keluar)
        .bind(&request.tujuan)
        .bind(id_user)
        .bind(&request.keterangan)
        .fetch_one(&mut **tx)
        .await?;

        let mut details = Vec::with_capacity(request.details.len());
        for detail in &request.details {
            let row = sqlx::query_as::<_, DetailTransaksiKeluar>(
                r#"
                INSERT INTO detail_transaksi_keluar
                (id_transaksi_keluar, id_barang, jumlah, created_at, updated_at)
                VALUES ($1, $2, $3, NOW(), NOW())
                RETURNING *
                "#,
            )
            .bind(transaksi.id_transaksi_keluar)
            .bind(detail.id_barang)
            .bind(detail.jumlah)
            .fetch_one(&mut **tx)
            .await?;

            details.push(row);
        }

        Ok(TransaksiKeluarWithDetails { transaksi, details })
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<TransaksiKeluarWithDetails>> {
        let transaksi = sqlx::query_as::<_, TransaksiKeluar>(
            "SELECT * FROM transaksi_keluar WHERE id_transaksi_keluar = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(transaksi) = transaksi else {
            return Ok(None);
        };

        let details = self.find_details_by_transaksi_id(id).await?;

        Ok(Some(TransaksiKeluarWithDetails { transaksi, details }))
    }

    pub async fn find_details_by_transaksi_id(
        &self,
        id: i32,
    ) -> AppResult<Vec<DetailTransaksiKeluar>> {
        let details = sqlx::query_as::<_, DetailTransaksiKeluar>(
            r#"
            SELECT * FROM detail_transaksi_keluar
            WHERE id_transaksi_keluar = $1
            ORDER BY id_detail_keluar
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Filter tujuan berupa pencarian substring case-insensitive
    pub async fn find_all(
        &self,
        page: u32,
        limit: u32,
        filter: &TransaksiKeluarQuery,
    ) -> AppResult<(Vec<TransaksiKeluar>, i64)> {
        let offset = (page - 1) * limit;

        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM transaksi_keluar WHERE 1=1");
        Self::push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM transaksi_keluar WHERE 1=1");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY tanggal_keluar DESC, created_at DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb
            .build_query_as::<TransaksiKeluar>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a TransaksiKeluarQuery) {
        if let Some(start_date) = filter.start_date {
            qb.push(" AND tanggal_keluar >= ");
            qb.push_bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            qb.push(" AND tanggal_keluar <= ");
            qb.push_bind(end_date);
        }
        if let Some(ref tujuan) = filter.tujuan {
            qb.push(" AND tujuan ILIKE ");
            qb.push_bind(format!("%{}%", tujuan));
        }
    }

    pub async fn update(
        &self,
        id: i32,
        patch: &UpdateTransaksiKeluarRequest,
    ) -> AppResult<Option<TransaksiKeluar>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb =
            QueryBuilder::<Postgres>::new("UPDATE transaksi_keluar SET updated_at = NOW()");

        if let Some(tanggal_keluar) = patch.tanggal_keluar {
            qb.push(", tanggal_keluar = ");
            qb.push_bind(tanggal_keluar);
        }
        if let Some(ref tujuan) = patch.tujuan {
            qb.push(", tujuan = ");
            qb.push_bind(tujuan);
        }
        if let Some(ref keterangan) = patch.keterangan {
            qb.push(", keterangan = ");
            qb.push_bind(keterangan);
        }

        qb.push(" WHERE id_transaksi_keluar = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        let transaksi = qb
            .build_query_as::<TransaksiKeluar>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(transaksi)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM transaksi_keluar WHERE id_transaksi_keluar = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ========== DETAIL OPERATIONS ==========

    pub async fn add_detail(
        &self,
        id_transaksi_keluar: i32,
        detail: &CreateDetailKeluarRequest,
    ) -> AppResult<DetailTransaksiKeluar> {
        let row = sqlx::query_as::<_, DetailTransaksiKeluar>(
            r#"
            INSERT INTO detail_transaksi_keluar
            (id_transaksi_keluar, id_barang, jumlah, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(id_transaksi_keluar)
        .bind(detail.id_barang)
        .bind(detail.jumlah)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_detail_by_id(&self, id: i32) -> AppResult<Option<DetailTransaksiKeluar>> {
        let detail = sqlx::query_as::<_, DetailTransaksiKeluar>(
            "SELECT * FROM detail_transaksi_keluar WHERE id_detail_keluar = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    pub async fn update_detail(
        &self,
        id: i32,
        patch: &UpdateDetailKeluarRequest,
    ) -> AppResult<Option<DetailTransaksiKeluar>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb =
            QueryBuilder::<Postgres>::new("UPDATE detail_transaksi_keluar SET updated_at = NOW()");

        if let Some(id_barang) = patch.id_barang {
            qb.push(", id_barang = ");
            qb.push_bind(id_barang);
        }
        if let Some(jumlah) = patch.jumlah {
            qb.push(", jumlah = ");
            qb.push_bind(jumlah);
        }

        qb.push(" WHERE id_detail_keluar = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        let detail = qb
            .build_query_as::<DetailTransaksiKeluar>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(detail)
    }

    pub async fn delete_detail(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM detail_transaksi_keluar WHERE id_detail_keluar = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
