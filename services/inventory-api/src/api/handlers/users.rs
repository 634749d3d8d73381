// /apotek-inventory/services/inventory-api/src/api/handlers/users.rs

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};

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

/// Handler untuk daftar semua user (tanpa kolom password)
/// GET /api/users
pub async fn get_all_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<Json<ApiResponse<PaginatedData<UserPublic>>>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let (page, limit) = utils_validator::validate_pagination(page, limit)?;

    let (users, total) = state.repository.user().find_all(page, limit).await?;

    let payload = PaginatedData {
        data: users,
        pagination: Pagination::new(page, limit, total),
    };

    Ok(Json(ApiResponse::ok("Users retrieved successfully", payload)))
}

/// GET /api/users/{id}
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserPublic>>> {
    let user = state
        .repository
        .user()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "User retrieved successfully",
        UserPublic::from(user),
    )))
}

/// Handler untuk update user oleh admin (role/status termasuk)
/// PUT /api/users/{id}
pub async fn update_user_by_id(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserPublic>>> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No valid fields to update".to_string()));
    }

    if let Some(ref role) = payload.role {
        utils_validator::validate_role(role)?;
    }

    if let Some(ref email) = payload.email {
        utils_validator::validate_email(email)?;

        if let Some(existing) = state.repository.user().find_by_email(email).await? {
            if existing.id != id {
                return Err(AppError::Conflict(
                    "Email already taken by another user".to_string(),
                ));
            }
        }
    }

    if let Some(ref username) = payload.username {
        if let Some(existing) = state.repository.user().find_by_username(username).await? {
            if existing.id != id {
                return Err(AppError::Conflict(
                    "Username already taken by another user".to_string(),
                ));
            }
        }
    }

    let user = state
        .repository
        .user()
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    record_activity(
        &state.repository,
        Some(actor.id),
        "UPDATE_USER",
        Some(format!("User #{} diperbarui", id)),
        None,
    )
    .await;

    Ok(Json(ApiResponse::ok(
        "User updated successfully",
        UserPublic::from(user),
    )))
}

/// Soft delete: akun dinonaktifkan, tidak pernah dihapus permanen
/// DELETE /api/users/{id}
pub async fn delete_user_by_id(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .repository
        .user()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let deleted = state.repository.user().soft_delete(id).await?;
    if !deleted {
        return Err(AppError::Internal("Failed to delete user".to_string()));
    }

    record_activity(
        &state.repository,
        Some(actor.id),
        "DELETE_USER",
        Some(format!("User #{} dinonaktifkan", id)),
        None,
    )
    .await;

    Ok(Json(ApiResponse::message("User deleted successfully")))
}
