// /apotek-inventory/services/inventory-api/src/repository/mod.rs

pub mod barang;
pub mod karyawan;
pub mod log_activity;
pub mod permission;
pub mod refresh_token;
pub mod supplier;
pub mod transaksi_keluar;
pub mod transaksi_masuk;
pub mod user;

use sqlx::PgPool;
use std::sync::Arc;

/// Main repository struct yang menggabungkan semua repositories
pub struct Repository {
    user_repo: Arc<user::UserRepository>,
    refresh_token_repo: Arc<refresh_token::RefreshTokenRepository>,
    barang_repo: Arc<barang::BarangRepository>,
    supplier_repo: Arc<supplier::SupplierRepository>,
    karyawan_repo: Arc<karyawan::KaryawanRepository>,
    transaksi_masuk_repo: Arc<transaksi_masuk::TransaksiMasukRepository>,
    transaksi_keluar_repo: Arc<transaksi_keluar::TransaksiKeluarRepository>,
    log_activity_repo: Arc<log_activity::LogActivityRepository>,
    permission_repo: Arc<permission::PermissionRepository>,
}

impl Repository {
    /// Create new repository instance
    pub fn new(pool: PgPool) -> Self {
        Self {
            user_repo: Arc::new(user::UserRepository::new(pool.clone())),
            refresh_token_repo: Arc::new(refresh_token::RefreshTokenRepository::new(pool.clone())),
            barang_repo: Arc::new(barang::BarangRepository::new(pool.clone())),
            supplier_repo: Arc::new(supplier::SupplierRepository::new(pool.clone())),
            karyawan_repo: Arc::new(karyawan::KaryawanRepository::new(pool.clone())),
            transaksi_masuk_repo: Arc::new(transaksi_masuk::TransaksiMasukRepository::new(
                pool.clone(),
            )),
            transaksi_keluar_repo: Arc::new(transaksi_keluar::TransaksiKeluarRepository::new(
                pool.clone(),
            )),
            log_activity_repo: Arc::new(log_activity::LogActivityRepository::new(pool.clone())),
            permission_repo: Arc::new(permission::PermissionRepository::new(pool)),
        }
    }

    pub fn user(&self) -> &user::UserRepository {
        &self.user_repo
    }

    pub fn refresh_token(&self) -> &refresh_token::RefreshTokenRepository {
        &self.refresh_token_repo
    }

    pub fn barang(&self) -> &barang::BarangRepository {
        &self.barang_repo
    }

    pub fn supplier(&self) -> &supplier::SupplierRepository {
        &self.supplier_repo
    }

    pub fn karyawan(&self) -> &karyawan::KaryawanRepository {
        &self.karyawan_repo
    }

    pub fn transaksi_masuk(&self) -> &transaksi_masuk::TransaksiMasukRepository {
        &self.transaksi_masuk_repo
    }

    pub fn transaksi_keluar(&self) -> &transaksi_keluar::TransaksiKeluarRepository {
        &self.transaksi_keluar_repo
    }

    pub fn log_activity(&self) -> &log_activity::LogActivityRepository {
        &self.log_activity_repo
    }

    pub fn permission(&self) -> &permission::PermissionRepository {
        &self.permission_repo
    }
}
