// /apotek-inventory/services/inventory-api/src/api/handlers/permissions.rs

use axum::{extract::State, response::Json};

use crate::{
    models::{ApiResponse, Permission},
    utils::error::AppResult,
    AppState,
};

/// Katalog seluruh permission yang dikenal sistem
/// GET /api/permissions
pub async fn get_all_permissions(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Permission>>>> {
    let permissions = state.repository.permission().find_all().await?;

    Ok(Json(ApiResponse::ok(
        "Permissions retrieved successfully",
        permissions,
    )))
}
