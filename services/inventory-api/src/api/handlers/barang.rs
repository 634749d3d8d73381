// /apotek-inventory/services/inventory-api/src/api/handlers/barang.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use validator::Validate;

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

/// Handler untuk membuat barang baru
/// POST /api/barang
pub async fn create_barang(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateBarangRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Barang>>)> {
    payload.validate()?;
    utils_validator::validate_satuan(&payload.satuan)?;
    utils_validator::validate_jenis(&payload.jenis)?;

    if let Some(stok_minimal) = payload.stok_minimal {
        if stok_minimal < 0 {
            return Err(AppError::BadRequest(
                "Stok minimal tidak boleh negatif".to_string(),
            ));
        }
    }

    let barang = state.repository.barang().create(&payload).await?;

    record_activity(
        &state.repository,
        Some(user.id),
        "CREATE_BARANG",
        Some(format!("Barang {} ditambahkan", barang.nama_barang)),
        None,
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Barang berhasil dibuat", barang)),
    ))
}

/// GET /api/barang
pub async fn get_all_barang(
    State(state): State<AppState>,
    Query(params): Query<BarangQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<Barang>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    if let Some(ref jenis) = params.jenis {
        utils_validator::validate_jenis(jenis)?;
    }
    if let Some(ref satuan) = params.satuan {
        utils_validator::validate_satuan(satuan)?;
    }

    let (rows, total) = state.repository.barang().find_all(page, limit, &params).await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok("Data barang berhasil diambil", payload)))
}

/// GET /api/barang/search?q=
pub async fn search_barang(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<Barang>>>> {
    utils_validator::validate_required(&params.q, "Parameter pencarian")?;

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state.repository.barang().search(&params.q, page, limit).await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Hasil pencarian barang berhasil diambil",
        payload,
    )))
}

/// GET /api/barang/{id}
pub async fn get_barang_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Barang>>> {
    let barang = state
        .repository
        .barang()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Barang tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Data barang berhasil diambil", barang)))
}

/// PUT /api/barang/{id}
pub async fn update_barang_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBarangRequest>,
) -> AppResult<Json<ApiResponse<Barang>>> {
    if let Some(ref satuan) = payload.satuan {
        utils_validator::validate_satuan(satuan)?;
    }
    if let Some(ref jenis) = payload.jenis {
        utils_validator::validate_jenis(jenis)?;
    }
    if let Some(stok_minimal) = payload.stok_minimal {
        if stok_minimal < 0 {
            return Err(AppError::BadRequest(
                "Stok minimal tidak boleh negatif".to_string(),
            ));
        }
    }

    let barang = state
        .repository
        .barang()
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Barang tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Barang berhasil diupdate", barang)))
}

/// Barang dihapus permanen
/// DELETE /api/barang/{id}
pub async fn delete_barang_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .barang()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Barang tidak ditemukan".to_string()))?;

    let deleted = state.repository.barang().delete(id).await?;
    if !deleted {
        return Err(AppError::Internal("Gagal menghapus barang".to_string()));
    }

    record_activity(
        &state.repository,
        Some(user.id),
        "DELETE_BARANG",
        Some(format!("Barang #{} dihapus", id)),
        None,
    )
    .await;

    Ok(Json(ApiResponse::message("Barang berhasil dihapus")))
}
