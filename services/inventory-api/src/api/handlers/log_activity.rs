// /apotek-inventory/services/inventory-api/src/api/handlers/log_activity.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    models::*,
    utils::{
        constants::constants::DEFAULT_LOG_RETENTION_DAYS,
        error::{AppError, AppResult},
        validator as utils_validator,
        DEFAULT_LOG_PAGE_SIZE, MAX_PAGE_SIZE,
    },
    AppState,
};

/// Handler untuk membuat log activity secara eksplisit
/// POST /api/logs
pub async fn create_log_activity(
    State(state): State<AppState>,
    Json(payload): Json<CreateLogActivityRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<LogActivity>>)> {
    utils_validator::validate_required(&payload.aksi, "Aksi")?;

    let log = state.repository.log_activity().create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Log activity berhasil dibuat", log)),
    ))
}

/// Handler untuk daftar log dengan filter
/// GET /api/logs
pub async fn get_all_log_activities(
    State(state): State<AppState>,
    Query(params): Query<LogActivityQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<LogActivity>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LOG_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (logs, total) = state
        .repository
        .log_activity()
        .find_all(page, limit, &params)
        .await?;

    let payload = PaginatedData {
        data: logs,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Data log activity berhasil diambil",
        payload,
    )))
}

/// Handler untuk pencarian log berdasarkan aksi atau deskripsi
/// GET /api/logs/search
pub async fn search_log_activities(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<LogActivity>>>> {
    utils_validator::validate_required(&params.q, "Parameter pencarian")?;

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LOG_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (logs, total) = state
        .repository
        .log_activity()
        .search(&params.q, page, limit)
        .await?;

    let payload = PaginatedData {
        data: logs,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Hasil pencarian log berhasil diambil",
        payload,
    )))
}

/// Handler untuk log milik satu user
/// GET /api/logs/user/{userId}
pub async fn get_logs_by_user_id(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<LogActivity>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LOG_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (logs, total) = state
        .repository
        .log_activity()
        .find_by_user(user_id, page, limit)
        .await?;

    let payload = PaginatedData {
        data: logs,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Data log user berhasil diambil",
        payload,
    )))
}

/// Handler untuk statistik jumlah log per aksi
/// GET /api/logs/statistics
pub async fn get_log_statistics(
    State(state): State<AppState>,
    Query(params): Query<LogStatisticsQuery>,
) -> AppResult<Json<ApiResponse<Vec<LogStatistic>>>> {
    let stats = state
        .repository
        .log_activity()
        .statistics(params.start_date, params.end_date)
        .await?;

    Ok(Json(ApiResponse::ok("Statistik log berhasil diambil", stats)))
}

/// Handler untuk satu record log
/// GET /api/logs/{id}
pub async fn get_log_activity_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LogActivity>>> {
    let log = state
        .repository
        .log_activity()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Log activity tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Data log activity berhasil diambil", log)))
}

/// Handler untuk pembersihan log lama
/// DELETE /api/logs/cleanup?daysOld=N
pub async fn delete_old_logs(
    State(state): State<AppState>,
    Query(params): Query<CleanupQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let days = utils_validator::validate_days_old(
        params.days_old.unwrap_or(DEFAULT_LOG_RETENTION_DAYS),
    )?;

    let removed = state.repository.log_activity().delete_old(days).await?;

    tracing::info!("Log cleanup removed {} rows older than {} days", removed, days);

    Ok(Json(ApiResponse::ok(
        "Log lama berhasil dihapus",
        serde_json::json!({ "deleted": removed, "daysOld": days }),
    )))
}
