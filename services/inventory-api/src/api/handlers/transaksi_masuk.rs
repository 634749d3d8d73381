// /apotek-inventory/services/inventory-api/src/api/handlers/transaksi_masuk.rs

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

/// Handler untuk membuat transaksi masuk beserta detailnya
/// POST /api/transaksi-masuk
pub async fn create_transaksi_masuk(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTransaksiMasukRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TransaksiMasukWithDetails>>)> {
    // Seluruh baris divalidasi sebelum ada yang ditulis
    utils_validator::validate_detail_masuk_lines(&payload.details)?;

    let transaksi = state
        .repository
        .transaksi_masuk()
        .create(&payload, user.id)
        .await?;

    record_activity(
        &state.repository,
        Some(user.id),
        "CREATE_TRANSAKSI_MASUK",
        Some(format!(
            "Transaksi masuk #{} dengan {} detail",
            transaksi.transaksi.id_transaksi_masuk,
            transaksi.details.len()
        )),
        Some(addr.ip().to_string()),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Transaksi masuk berhasil dibuat", transaksi)),
    ))
}

/// Handler untuk daftar transaksi masuk dengan filter dan paginasi
/// GET /api/transaksi-masuk
pub async fn get_all_transaksi_masuk(
    State(state): State<AppState>,
    Query(params): Query<TransaksiMasukQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<TransaksiMasuk>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state
        .repository
        .transaksi_masuk()
        .find_all(page, limit, &params)
        .await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Data transaksi masuk berhasil diambil",
        payload,
    )))
}

/// Handler untuk detail satu transaksi masuk
/// GET /api/transaksi-masuk/{id}
pub async fn get_transaksi_masuk_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<TransaksiMasukWithDetails>>> {
    let transaksi = state
        .repository
        .transaksi_masuk()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi masuk tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Data transaksi masuk berhasil diambil",
        transaksi,
    )))
}

/// Handler untuk update header transaksi masuk; detail tidak tersentuh
/// PUT /api/transaksi-masuk/{id}
pub async fn update_transaksi_masuk_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTransaksiMasukRequest>,
) -> AppResult<Json<ApiResponse<TransaksiMasukWithDetails>>> {
    state
        .repository
        .transaksi_masuk()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi masuk tidak ditemukan".to_string()))?;

    state
        .repository
        .transaksi_masuk()
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi masuk tidak ditemukan".to_string()))?;

    // Ambil ulang beserta detail agar response konsisten dengan GET
    let transaksi = state
        .repository
        .transaksi_masuk()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal("Gagal mengambil transaksi setelah update".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Transaksi masuk berhasil diupdate",
        transaksi,
    )))
}

/// Handler untuk hapus transaksi masuk (cascade ke detail)
/// DELETE /api/transaksi-masuk/{id}
pub async fn delete_transaksi_masuk_by_id(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .transaksi_masuk()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi masuk tidak ditemukan".to_string()))?;

    let deleted = state.repository.transaksi_masuk().delete(id).await?;
    if !deleted {
        return Err(AppError::Internal(
            "Gagal menghapus transaksi masuk".to_string(),
        ));
    }

    record_activity(
        &state.repository,
        Some(user.id),
        "DELETE_TRANSAKSI_MASUK",
        Some(format!("Transaksi masuk #{} dihapus", id)),
        Some(addr.ip().to_string()),
    )
    .await;

    Ok(Json(ApiResponse::message("Transaksi masuk berhasil dihapus")))
}

// ========================= DETAIL HANDLERS =========================

/// Handler untuk menambah satu baris detail ke transaksi yang sudah ada
/// POST /api/transaksi-masuk/{id}/details
pub async fn add_detail_transaksi_masuk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateDetailMasukRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DetailMasukView>>)> {
    utils_validator::validate_detail_masuk(&payload)?;

    state
        .repository
        .transaksi_masuk()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi masuk tidak ditemukan".to_string()))?;

    let detail = state
        .repository
        .transaksi_masuk()
        .add_detail(id, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Detail transaksi masuk berhasil ditambahkan",
            DetailMasukView::from(detail),
        )),
    ))
}

/// Handler untuk update satu baris detail
/// PUT /api/transaksi-masuk/{id}/details/{detailId}
pub async fn update_detail_transaksi_masuk_by_id(
    State(state): State<AppState>,
    Path((_id, detail_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateDetailMasukRequest>,
) -> AppResult<Json<ApiResponse<DetailMasukView>>> {
    state
        .repository
        .transaksi_masuk()
        .find_detail_by_id(detail_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Detail transaksi masuk tidak ditemukan".to_string()))?;

    // Validasi batas hanya untuk field yang dikirim
    if let Some(jumlah) = payload.jumlah {
        if jumlah <= 0 {
            return Err(AppError::BadRequest(
                "Jumlah harus lebih besar dari 0".to_string(),
            ));
        }
    }

    if let Some(ref harga_satuan) = payload.harga_satuan {
        if harga_satuan < &bigdecimal::BigDecimal::from(0) {
            return Err(AppError::BadRequest(
                "Harga satuan tidak boleh negatif".to_string(),
            ));
        }
    }

    let detail = state
        .repository
        .transaksi_masuk()
        .update_detail(detail_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Detail transaksi masuk tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Detail transaksi masuk berhasil diupdate",
        DetailMasukView::from(detail),
    )))
}

/// Handler untuk hapus satu baris detail
/// DELETE /api/transaksi-masuk/{id}/details/{detailId}
pub async fn delete_detail_transaksi_masuk_by_id(
    State(state): State<AppState>,
    Path((_id, detail_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .transaksi_masuk()
        .find_detail_by_id(detail_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Detail transaksi masuk tidak ditemukan".to_string()))?;

    let deleted = state
        .repository
        .transaksi_masuk()
        .delete_detail(detail_id)
        .await?;

    if !deleted {
        return Err(AppError::Internal(
            "Gagal menghapus detail transaksi masuk".to_string(),
        ));
    }

    Ok(Json(ApiResponse::message(
        "Detail transaksi masuk berhasil dihapus",
    )))
}
