// /apotek-inventory/services/inventory-api/src/repository/transaksi_masuk.rs

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::models::{
    CreateDetailMasukRequest, CreateTransaksiMasukRequest, DetailMasukView, DetailTransaksiMasuk,
    TransaksiMasuk, TransaksiMasukQuery, TransaksiMasukWithDetails, UpdateDetailMasukRequest,
    UpdateTransaksiMasukRequest,
};
use crate::utils::error::{AppError, AppResult};

/// Repository untuk transaksi masuk beserta detail barangnya
pub struct TransaksiMasukRepository {
    pool: PgPool,
}

impl TransaksiMasukRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buat transaksi masuk beserta seluruh detailnya dalam satu unit atomik.
    /// Gagal di tengah berarti rollback eksplisit; tidak ada header yatim.
    pub async fn create(
        &self,
        request: &CreateTransaksiMasukRequest,
        id_user: i32,
    ) -> AppResult<TransaksiMasukWithDetails> {
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
        request: &CreateTransaksiMasukRequest,
        id_user: i32,
    ) -> AppResult<TransaksiMasukWithDetails> {
        let transaksi = sqlx::query_as::<_, TransaksiMasuk>(
            r#"
            INSERT INTO transaksi_masuk (tanggal_masuk, id_supplier, id_user, keterangan, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(request.tanggal_masuk)
        .bind(request.id_supplier)
        .bind(id_user)
        .bind(&request.keterangan)
        .fetch_one(&mut **tx)
        .await?;

        // Detail disisipkan berurutan sesuai input
        let mut details = Vec::with_capacity(request.details.len());
        for detail in &request.details {
            let row = sqlx::query_as::<_, DetailTransaksiMasuk>(
                r#"
                INSERT INTO detail_transaksi_masuk
                (id_transaksi_masuk, id_barang, jumlah, harga_satuan, tanggal_kadaluarsa, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
                RETURNING *
                "#,
            )
            .bind(transaksi.id_transaksi_masuk)
            .bind(detail.id_barang)
            .bind(detail.jumlah)
            .bind(&detail.harga_satuan)
            .bind(detail.tanggal_kadaluarsa)
            .fetch_one(&mut **tx)
            .await?;

            details.push(DetailMasukView::from(row));
        }

        Ok(TransaksiMasukWithDetails { transaksi, details })
    }

    /// Header + detail terurut berdasarkan id detail ascending
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<TransaksiMasukWithDetails>> {
        let transaksi = sqlx::query_as::<_, TransaksiMasuk>(
            "SELECT * FROM transaksi_masuk WHERE id_transaksi_masuk = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(transaksi) = transaksi else {
            return Ok(None);
        };

        let details = self.find_details_by_transaksi_id(id).await?;

        Ok(Some(TransaksiMasukWithDetails {
            transaksi,
            details: details.into_iter().map(DetailMasukView::from).collect(),
        }))
    }

    pub async fn find_details_by_transaksi_id(
        &self,
        id: i32,
    ) -> AppResult<Vec<DetailTransaksiMasuk>> {
        let details = sqlx::query_as::<_, DetailTransaksiMasuk>(
            r#"
            SELECT * FROM detail_transaksi_masuk
            WHERE id_transaksi_masuk = $1
            ORDER BY id_detail_masuk
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Daftar transaksi dengan filter konjungtif dan paginasi deterministik
    pub async fn find_all(
        &self,
        page: u32,
        limit: u32,
        filter: &TransaksiMasukQuery,
    ) -> AppResult<(Vec<TransaksiMasuk>, i64)> {
        let offset = (page - 1) * limit;

        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM transaksi_masuk WHERE 1=1");
        Self::push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM transaksi_masuk WHERE 1=1");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY tanggal_masuk DESC, created_at DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb
            .build_query_as::<TransaksiMasuk>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a TransaksiMasukQuery) {
        if let Some(start_date) = filter.start_date {
            qb.push(" AND tanggal_masuk >= ");
            qb.push_bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            qb.push(" AND tanggal_masuk <= ");
            qb.push_bind(end_date);
        }
        if let Some(id_supplier) = filter.id_supplier {
            qb.push(" AND id_supplier = ");
            qb.push_bind(id_supplier);
        }
    }

    /// Update field skalar header; baris detail tidak pernah tersentuh
    pub async fn update(
        &self,
        id: i32,
        patch: &UpdateTransaksiMasukRequest,
    ) -> AppResult<Option<TransaksiMasuk>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE transaksi_masuk SET updated_at = NOW()");

        if let Some(tanggal_masuk) = patch.tanggal_masuk {
            qb.push(", tanggal_masuk = ");
            qb.push_bind(tanggal_masuk);
        }
        if let Some(id_supplier) = patch.id_supplier {
            qb.push(", id_supplier = ");
            qb.push_bind(id_supplier);
        }
        if let Some(ref keterangan) = patch.keterangan {
            qb.push(", keterangan = ");
            qb.push_bind(keterangan);
        }

        qb.push(" WHERE id_transaksi_masuk = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        let transaksi = qb
            .build_query_as::<TransaksiMasuk>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(transaksi)
    }

    /// Hapus header; storage meng-cascade penghapusan detail
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM transaksi_masuk WHERE id_transaksi_masuk = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ========== DETAIL OPERATIONS ==========

    pub async fn add_detail(
        &self,
        id_transaksi_masuk: i32,
        detail: &CreateDetailMasukRequest,
    ) -> AppResult<DetailTransaksiMasuk> {
        let row = sqlx::query_as::<_, DetailTransaksiMasuk>(
            r#"
            INSERT INTO detail_transaksi_masuk
            (id_transaksi_masuk, id_barang, jumlah, harga_satuan, tanggal_kadaluarsa, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(id_transaksi_masuk)
        .bind(detail.id_barang)
        .bind(detail.jumlah)
        .bind(&detail.harga_satuan)
        .bind(detail.tanggal_kadaluarsa)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_detail_by_id(&self, id: i32) -> AppResult<Option<DetailTransaksiMasuk>> {
        let detail = sqlx::query_as::<_, DetailTransaksiMasuk>(
            "SELECT * FROM detail_transaksi_masuk WHERE id_detail_masuk = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    pub async fn update_detail(
        &self,
        id: i32,
        patch: &UpdateDetailMasukRequest,
    ) -> AppResult<Option<DetailTransaksiMasuk>> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data yang akan diupdate".to_string(),
            ));
        }

        let mut qb =
            QueryBuilder::<Postgres>::new("UPDATE detail_transaksi_masuk SET updated_at = NOW()");

        if let Some(id_barang) = patch.id_barang {
            qb.push(", id_barang = ");
            qb.push_bind(id_barang);
        }
        if let Some(jumlah) = patch.jumlah {
            qb.push(", jumlah = ");
            qb.push_bind(jumlah);
        }
        if let Some(ref harga_satuan) = patch.harga_satuan {
            qb.push(", harga_satuan = ");
            qb.push_bind(harga_satuan);
        }
        if let Some(tanggal_kadaluarsa) = patch.tanggal_kadaluarsa {
            qb.push(", tanggal_kadaluarsa = ");
            qb.push_bind(tanggal_kadaluarsa);
        }

        qb.push(" WHERE id_detail_masuk = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        let detail = qb
            .build_query_as::<DetailTransaksiMasuk>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(detail)
    }

    pub async fn delete_detail(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM detail_transaksi_masuk WHERE id_detail_masuk = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
