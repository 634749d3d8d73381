// /apotek-inventory/services/inventory-api/src/api/handlers/transaksi_keluar.rs

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use std::net::SocketAddr;

use crate::{
    middleware::auth::AuthUser,
    models::*,
    utils::{
        audit::record_activity,
        error::{AppError, AppResult},
        validator as utils_validator,
        DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
    AppState,
};

/// Handler untuk membuat transaksi keluar beserta detailnya
/// POST /api/transaksi-keluar
pub async fn create_transaksi_keluar(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTransaksiKeluarRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TransaksiKeluarWithDetails>>)> {
    utils_validator::validate_required(&payload.tujuan, "Tujuan")?;
    utils_validator::validate_detail_keluar_lines(&payload.details)?;

    let transaksi = state
        .repository
        .transaksi_keluar()
        .create(&payload, user.id)
        .await?;

    record_activity(
        &state.repository,
        Some(user.id),
        "CREATE_TRANSAKSI_KELUAR",
        Some(format!(
            "Transaksi keluar #{} tujuan {} dengan {} detail",
            transaksi.transaksi.id_transaksi_keluar,
            transaksi.transaksi.tujuan,
            transaksi.details.len()
        )),
        Some(addr.ip().to_string()),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Transaksi keluar berhasil dibuat", transaksi)),
    ))
}

/// Handler untuk daftar transaksi keluar dengan filter dan paginasi
/// GET /api/transaksi-keluar
pub async fn get_all_transaksi_keluar(
    State(state): State<AppState>,
    Query(params): Query<TransaksiKeluarQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<TransaksiKeluar>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state
        .repository
        .transaksi_keluar()
        .find_all(page, limit, &params)
        .await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Data transaksi keluar berhasil diambil",
        payload,
    )))
}

/// Handler untuk detail satu transaksi keluar
/// GET /api/transaksi-keluar/{id}
pub async fn get_transaksi_keluar_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<TransaksiKeluarWithDetails>>> {
    let transaksi = state
        .repository
        .transaksi_keluar()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi keluar tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Data transaksi keluar berhasil diambil",
        transaksi,
    )))
}

/// Handler untuk update header transaksi keluar
/// PUT /api/transaksi-keluar/{id}
pub async fn update_transaksi_keluar_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTransaksiKeluarRequest>,
) -> AppResult<Json<ApiResponse<TransaksiKeluarWithDetails>>> {
    if let Some(ref tujuan) = payload.tujuan {
        utils_validator::validate_required(tujuan, "Tujuan")?;
    }

    state
        .repository
        .transaksi_keluar()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi keluar tidak ditemukan".to_string()))?;

    state
        .repository
        .transaksi_keluar()
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi keluar tidak ditemukan".to_string()))?;

    let transaksi = state
        .repository
        .transaksi_keluar()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal("Gagal mengambil transaksi setelah update".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Transaksi keluar berhasil diupdate",
        transaksi,
    )))
}

/// Handler untuk hapus transaksi keluar (cascade ke detail)
/// DELETE /api/transaksi-keluar/{id}
pub async fn delete_transaksi_keluar_by_id(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .transaksi_keluar()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi keluar tidak ditemukan".to_string()))?;

    let deleted = state.repository.transaksi_keluar().delete(id).await?;
    if !deleted {
        return Err(AppError::Internal(
            "Gagal menghapus transaksi keluar".to_string(),
        ));
    }

    record_activity(
        &state.repository,
        Some(user.id),
        "DELETE_TRANSAKSI_KELUAR",
        Some(format!("Transaksi keluar #{} dihapus", id)),
        Some(addr.ip().to_string()),
    )
    .await;

    Ok(Json(ApiResponse::message("Transaksi keluar berhasil dihapus")))
}

// ========================= DETAIL HANDLERS =========================

/// POST /api/transaksi-keluar/{id}/details
pub async fn add_detail_transaksi_keluar(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateDetailKeluarRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DetailTransaksiKeluar>>)> {
    utils_validator::validate_detail_keluar(&payload)?;

    state
        .repository
        .transaksi_keluar()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi keluar tidak ditemukan".to_string()))?;

    let detail = state
        .repository
        .transaksi_keluar()
        .add_detail(id, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Detail transaksi keluar berhasil ditambahkan",
            detail,
        )),
    ))
}

/// PUT /api/transaksi-keluar/{id}/details/{detailId}
pub async fn update_detail_transaksi_keluar_by_id(
    State(state): State<AppState>,
    Path((_id, detail_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateDetailKeluarRequest>,
) -> AppResult<Json<ApiResponse<DetailTransaksiKeluar>>> {
    state
        .repository
        .transaksi_keluar()
        .find_detail_by_id(detail_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Detail transaksi keluar tidak ditemukan".to_string()))?;

    if let Some(jumlah) = payload.jumlah {
        if jumlah <= 0 {
            return Err(AppError::BadRequest(
                "Jumlah harus lebih besar dari 0".to_string(),
            ));
        }
    }

    let detail = state
        .repository
        .transaksi_keluar()
        .update_detail(detail_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Detail transaksi keluar tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Detail transaksi keluar berhasil diupdate",
        detail,
    )))
}

/// DELETE /api/transaksi-keluar/{id}/details/{detailId}
pub async fn delete_detail_transaksi_keluar_by_id(
    State(state): State<AppState>,
    Path((_id, detail_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .transaksi_keluar()
        .find_detail_by_id(detail_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Detail transaksi keluar tidak ditemukan".to_string()))?;

    let deleted = state
        .repository
        .transaksi_keluar()
        .delete_detail(detail_id)
        .await?;

    if !deleted {
        return Err(AppError::Internal(
            "Gagal menghapus detail transaksi keluar".to_string(),
        ));
    }

    Ok(Json(ApiResponse::message(
        "Detail transaksi keluar berhasil dihapus",
    )))
}
