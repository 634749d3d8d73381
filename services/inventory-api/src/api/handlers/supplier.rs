// /apotek-inventory/services/inventory-api/src/api/handlers/supplier.rs

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

/// POST /api/supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Supplier>>)> {
    payload.validate()?;

    if state
        .repository
        .supplier()
        .find_by_nama(&payload.nama_supplier)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Nama supplier sudah terdaftar".to_string()));
    }

    let supplier = state.repository.supplier().create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Supplier berhasil dibuat", supplier)),
    ))
}

/// GET /api/supplier
pub async fn get_all_supplier(
    State(state): State<AppState>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<Supplier>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state.repository.supplier().find_all(page, limit).await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok("Data supplier berhasil diambil", payload)))
}

/// GET /api/supplier/search?q=
pub async fn search_supplier(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<Supplier>>>> {
    utils_validator::validate_required(&params.q, "Parameter pencarian")?;

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (rows, total) = state
        .repository
        .supplier()
        .search(&params.q, page, limit)
        .await?;

    let payload = PaginatedData {
        data: rows,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok(
        "Hasil pencarian supplier berhasil diambil",
        payload,
    )))
}

/// GET /api/supplier/{id}
pub async fn get_supplier_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    let supplier = state
        .repository
        .supplier()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Data supplier berhasil diambil", supplier)))
}

/// PUT /api/supplier/{id}
pub async fn update_supplier_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    if let Some(ref nama_supplier) = payload.nama_supplier {
        if let Some(existing) = state.repository.supplier().find_by_nama(nama_supplier).await? {
            if existing.id_supplier != id {
                return Err(AppError::Conflict(
                    "Nama supplier sudah terdaftar".to_string(),
                ));
            }
        }
    }

    let supplier = state
        .repository
        .supplier()
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Supplier berhasil diupdate", supplier)))
}

/// Supplier dihapus permanen
/// DELETE /api/supplier/{id}
pub async fn delete_supplier_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .supplier()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier tidak ditemukan".to_string()))?;

    let deleted = state.repository.supplier().delete(id).await?;
    if !deleted {
        return Err(AppError::Internal("Gagal menghapus supplier".to_string()));
    }

    Ok(Json(ApiResponse::message("Supplier berhasil dihapus")))
}
