// /apotek-inventory/services/inventory-api/src/api/routes.rs

use axum::{
    middleware as axum_middleware,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;
use crate::{middleware::auth::require_admin, AppState};

/// Create semua routes untuk inventory API
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(api_info))
        .nest("/api/auth", auth_routes())
        .nest("/api/users", user_routes())
        .nest("/api/barang", barang_routes())
        .nest("/api/supplier", supplier_routes())
        .nest("/api/karyawan", karyawan_routes())
        .nest("/api/transaksi-masuk", transaksi_masuk_routes())
        .nest("/api/transaksi-keluar", transaksi_keluar_routes())
        .nest("/api/logs", log_activity_routes())
        .nest("/api/permissions", permission_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        // Public routes
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh_token))
        .route("/logout", post(handlers::auth::logout))
        // Protected routes
        .route("/logout-all", post(handlers::auth::logout_all))
        .route(
            "/profile",
            get(handlers::auth::get_profile).put(handlers::auth::update_profile),
        )
        .route("/change-password", put(handlers::auth::change_password))
        .route("/permissions", get(handlers::auth::get_user_permissions))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::users::get_all_users))
        .route(
            "/{id}",
            get(handlers::users::get_user_by_id)
                .put(handlers::users::update_user_by_id)
                .delete(handlers::users::delete_user_by_id),
        )
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn barang_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::barang::get_all_barang).post(handlers::barang::create_barang),
        )
        .route("/search", get(handlers::barang::search_barang))
        .route(
            "/{id}",
            get(handlers::barang::get_barang_by_id)
                .put(handlers::barang::update_barang_by_id)
                .delete(handlers::barang::delete_barang_by_id),
        )
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::supplier::get_all_supplier).post(handlers::supplier::create_supplier),
        )
        .route("/search", get(handlers::supplier::search_supplier))
        .route(
            "/{id}",
            get(handlers::supplier::get_supplier_by_id)
                .put(handlers::supplier::update_supplier_by_id)
                .delete(handlers::supplier::delete_supplier_by_id),
        )
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn karyawan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::karyawan::get_all_karyawan).post(handlers::karyawan::create_karyawan),
        )
        .route("/search", get(handlers::karyawan::search_karyawan))
        .route(
            "/{id}",
            get(handlers::karyawan::get_karyawan_by_id)
                .put(handlers::karyawan::update_karyawan_by_id)
                .delete(handlers::karyawan::delete_karyawan_by_id),
        )
        .route("/{id}/hard", delete(handlers::karyawan::hard_delete_karyawan_by_id))
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn transaksi_masuk_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::transaksi_masuk::get_all_transaksi_masuk)
                .post(handlers::transaksi_masuk::create_transaksi_masuk),
        )
        .route(
            "/{id}",
            get(handlers::transaksi_masuk::get_transaksi_masuk_by_id)
                .put(handlers::transaksi_masuk::update_transaksi_masuk_by_id)
                .delete(handlers::transaksi_masuk::delete_transaksi_masuk_by_id),
        )
        .route(
            "/{id}/details",
            post(handlers::transaksi_masuk::add_detail_transaksi_masuk),
        )
        .route(
            "/{id}/details/{detailId}",
            put(handlers::transaksi_masuk::update_detail_transaksi_masuk_by_id)
                .delete(handlers::transaksi_masuk::delete_detail_transaksi_masuk_by_id),
        )
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn transaksi_keluar_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::transaksi_keluar::get_all_transaksi_keluar)
                .post(handlers::transaksi_keluar::create_transaksi_keluar),
        )
        .route(
            "/{id}",
            get(handlers::transaksi_keluar::get_transaksi_keluar_by_id)
                .put(handlers::transaksi_keluar::update_transaksi_keluar_by_id)
                .delete(handlers::transaksi_keluar::delete_transaksi_keluar_by_id),
        )
        .route(
            "/{id}/details",
            post(handlers::transaksi_keluar::add_detail_transaksi_keluar),
        )
        .route(
            "/{id}/details/{detailId}",
            put(handlers::transaksi_keluar::update_detail_transaksi_keluar_by_id)
                .delete(handlers::transaksi_keluar::delete_detail_transaksi_keluar_by_id),
        )
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn log_activity_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::log_activity::search_log_activities))
        .route("/statistics", get(handlers::log_activity::get_log_statistics))
        .route("/user/{userId}", get(handlers::log_activity::get_logs_by_user_id))
        .route("/cleanup", delete(handlers::log_activity::delete_old_logs))
        .route(
            "/",
            get(handlers::log_activity::get_all_log_activities)
                .post(handlers::log_activity::create_log_activity),
        )
        .route("/{id}", get(handlers::log_activity::get_log_activity_by_id))
        .route_layer(axum_middleware::from_fn(require_admin))
}

fn permission_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::permissions::get_all_permissions))
        .route_layer(axum_middleware::from_fn(require_admin))
}

/// Ringkasan endpoint untuk root /api
async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Inventory Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /api/health",
            "auth": {
                "register": "POST /api/auth/register",
                "login": "POST /api/auth/login",
                "refresh": "POST /api/auth/refresh",
                "logout": "POST /api/auth/logout",
                "logoutAll": "POST /api/auth/logout-all",
                "profile": "GET /api/auth/profile",
                "updateProfile": "PUT /api/auth/profile",
                "changePassword": "PUT /api/auth/change-password",
            },
            "users": "GET /api/users",
            "barang": "GET /api/barang",
            "supplier": "GET /api/supplier",
            "karyawan": "GET /api/karyawan",
            "transaksiMasuk": "GET /api/transaksi-masuk",
            "transaksiKeluar": "GET /api/transaksi-keluar",
            "logs": "GET /api/logs",
        },
    }))
}
