// /apotek-inventory/services/inventory-api/src/api/handlers/karyawan.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use crate::{
    models::*,
    utils::{
        error::{AppError, AppResult},
        validator as utils_validator,
        DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
    AppState,
};

/// POST /api/karyawan
pub async fn create_karyawan(
    State(state): State<AppState>,
    Json(payload): Json<CreateKaryawanRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Karyawan>>)> {
    payload.validate()?;

    if let Some(ref nip) = payload.nip {
        if state.repository.karyawan().find_by_nip(nip).await?.is_some() {
            return Err(AppError::Conflict("NIP sudah terdaftar".to_string()));
        }
    }

    let karyawan = state.repository.karyawan().create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Karyawan berhasil dibuat", karyawan)),
    ))
}

/// GET /api/karyawan
pub async fn get_all_karyawan(
    State(state): State<AppState>,
    Query(params): Query<KaryawanQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<Karyawan>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state
        .repository
        .karyawan()
        .find_all(page, limit, &params)
        .await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok("Data karyawan berhasil diambil", payload)))
}

/// GET /api/karyawan/search?q=
pub async fn search_karyawan(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<Karyawan>>>> {
    utils_validator::validate_required(&params.q, "Parameter pencarian")?;

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state
        .repository
        .karyawan()
        .search(&params.q, page, limit)
        .await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Hasil pencarian karyawan berhasil diambil",
        payload,
    )))
}

/// GET /api/karyawan/{id}
pub async fn get_karyawan_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Karyawan>>> {
    let karyawan = state
        .repository
        .karyawan()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Karyawan tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Data karyawan berhasil diambil", karyawan)))
}

/// PUT /api/karyawan/{id}
pub async fn update_karyawan_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateKaryawanRequest>,
) -> AppResult<Json<ApiResponse<Karyawan>>> {
    if let Some(ref nip) = payload.nip {
        if let Some(existing) = state.repository.karyawan().find_by_nip(nip).await? {
            if existing.id_karyawan != id {
                return Err(AppError::Conflict("NIP sudah terdaftar".to_string()));
            }
        }
    }

    let karyawan = state
        .repository
        .karyawan()
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Karyawan tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Karyawan berhasil diupdate", karyawan)))
}

/// Soft delete: karyawan ditandai tidak aktif
/// DELETE /api/karyawan/{id}
pub async fn delete_karyawan_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .karyawan()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Karyawan tidak ditemukan".to_string()))?;

    let deleted = state.repository.karyawan().soft_delete(id).await?;
    if !deleted {
        return Err(AppError::Internal("Gagal menonaktifkan karyawan".to_string()));
    }

    Ok(Json(ApiResponse::message("Karyawan berhasil dinonaktifkan")))
}

/// Hard delete: hapus permanen
/// DELETE /api/karyawan/{id}/hard
pub async fn hard_delete_karyawan_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .karyawan()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Karyawan tidak ditemukan".to_string()))?;

    let deleted = state.repository.karyawan().hard_delete(id).await?;
    if !deleted {
        return Err(AppError::Internal("Gagal menghapus karyawan".to_string()));
    }

    Ok(Json(ApiResponse::message("Karyawan berhasil dihapus permanen")))
}
