// /apotek-inventory/services/inventory-api/src/repository/log_activity.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{CreateLogActivityRequest, LogActivity, LogActivityQuery, LogStatistic};
use crate::utils::error::AppResult;

/// Repository untuk log aktivitas (append-only)
pub struct LogActivityRepository {
    pool: PgPool,
}

impl LogActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tulis satu record log; waktu default ke jam server saat disimpan
    pub async fn create(&self, request: CreateLogActivityRequest) -> AppResult<LogActivity> {
        let log = sqlx::query_as::<_, LogActivity>(
            r#"
            INSERT INTO log_activity (id_user, waktu, aksi, deskripsi, ip_address, created_at)
            VALUES ($1, COALESCE($2, CURRENT_TIMESTAMP), $3, $4, $5, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(request.id_user)
        .bind(request.waktu)
        .bind(&request.aksi)
        .bind(&request.deskripsi)
        .bind(&request.ip_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn find_by_id(&self, id_log: i32) -> AppResult<Option<LogActivity>> {
        let log = sqlx::query_as::<_, LogActivity>("SELECT * FROM log_activity WHERE id_log = $1")
            .bind(id_log)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    /// Daftar log dengan filter konjungtif
    pub async fn find_all(
        &self,
        page: u32,
        limit: u32,
        filter: &LogActivityQuery,
    ) -> AppResult<(Vec<LogActivity>, i64)> {
        let offset = (page - 1) * limit;

        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM log_activity WHERE 1=1");
        Self::push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM log_activity WHERE 1=1");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY waktu DESC, id_log DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let logs = qb
            .build_query_as::<LogActivity>()
            .fetch_all(&self.pool)
            .await?;

        Ok((logs, total))
    }

    fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a LogActivityQuery) {
        if let Some(id_user) = filter.id_user {
            qb.push(" AND id_user = ");
            qb.push_bind(id_user);
        }
        if let Some(ref aksi) = filter.aksi {
            qb.push(" AND aksi = ");
            qb.push_bind(aksi);
        }
        if let Some(start_date) = filter.start_date {
            qb.push(" AND waktu >= ");
            qb.push_bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            qb.push(" AND waktu <= ");
            qb.push_bind(end_date);
        }
        if let Some(ref ip_address) = filter.ip_address {
            qb.push(" AND ip_address = ");
            qb.push_bind(ip_address);
        }
    }

    /// Cari log berdasarkan substring aksi atau deskripsi
    pub async fn search(
        &self,
        search_term: &str,
        page: u32,
        limit: u32,
    ) -> AppResult<(Vec<LogActivity>, i64)> {
        let offset = (page - 1) * limit;
        let pattern = format!("%{}%", search_term);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM log_activity WHERE deskripsi ILIKE $1 OR aksi ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let logs = sqlx::query_as::<_, LogActivity>(
            r#"
            SELECT * FROM log_activity
            WHERE deskripsi ILIKE $1 OR aksi ILIKE $1
            ORDER BY waktu DESC, id_log DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((logs, total))
    }

    pub async fn find_by_user(
        &self,
        id_user: i32,
        page: u32,
        limit: u32,
    ) -> AppResult<(Vec<LogActivity>, i64)> {
        let offset = (page - 1) * limit;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM log_activity WHERE id_user = $1")
                .bind(id_user)
                .fetch_one(&self.pool)
                .await?;

        let logs = sqlx::query_as::<_, LogActivity>(
            r#"
            SELECT * FROM log_activity
            WHERE id_user = $1
            ORDER BY waktu DESC, id_log DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(id_user)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((logs, total))
    }

    /// Statistik jumlah log per jenis aksi
    pub async fn statistics(
        &self,
        start_date: Option<chrono::DateTime<chrono::Utc>>,
        end_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Vec<LogStatistic>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT aksi, COUNT(*) as count FROM log_activity WHERE 1=1",
        );

        if let Some(start) = start_date {
            qb.push(" AND waktu >= ");
            qb.push_bind(start);
        }
        if let Some(end) = end_date {
            qb.push(" AND waktu <= ");
            qb.push_bind(end);
        }

        qb.push(" GROUP BY aksi ORDER BY count DESC");

        let stats = qb
            .build_query_as::<LogStatistic>()
            .fetch_all(&self.pool)
            .await?;

        Ok(stats)
    }

    /// Hapus log yang lebih tua dari `days` hari; kembalikan jumlah terhapus
    pub async fn delete_old(&self, days: i32) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM log_activity WHERE waktu < CURRENT_TIMESTAMP - make_interval(days => $1)",
        )
        .bind(days)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
