// /apotek-inventory/services/inventory-api/src/models.rs

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

lazy_static! {
    pub static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();
}

// ===== USER & AUTH =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub is_active: bool,
    pub id_karyawan: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tampilan user tanpa kolom password
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPublic {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub id_karyawan: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            id_karyawan: user.id_karyawan,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    pub aud: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RefreshToken {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100, message = "Username harus 3-100 karakter"))]
    pub username: String,

    #[validate(custom(function = "validate_email_format", message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password wajib diisi"))]
    pub password: String,

    pub role: Option<String>,
    pub id_karyawan: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username wajib diisi"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password wajib diisi"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 100, message = "Username harus 3-100 karakter"))]
    pub username: Option<String>,

    #[validate(custom(function = "validate_email_format", message = "Format email tidak valid"))]
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Patch untuk update user oleh admin
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub id_karyawan: Option<i32>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
            && self.id_karyawan.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserPublic,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

// ===== BARANG =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Barang {
    pub id_barang: i32,
    pub nama_barang: String,
    pub satuan: String,
    pub jenis: String,
    pub stok_minimal: i32,
    pub lokasi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBarangRequest {
    #[validate(length(min = 1, max = 255, message = "Nama barang harus 1-255 karakter"))]
    pub nama_barang: String,
    pub satuan: String,
    pub jenis: String,
    pub stok_minimal: Option<i32>,
    pub lokasi: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBarangRequest {
    pub nama_barang: Option<String>,
    pub satuan: Option<String>,
    pub jenis: Option<String>,
    pub stok_minimal: Option<i32>,
    pub lokasi: Option<String>,
}

impl UpdateBarangRequest {
    pub fn is_empty(&self) -> bool {
        self.nama_barang.is_none()
            && self.satuan.is_none()
            && self.jenis.is_none()
            && self.stok_minimal.is_none()
            && self.lokasi.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct BarangQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub jenis: Option<String>,
    pub satuan: Option<String>,
}

// ===== SUPPLIER =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supplier {
    pub id_supplier: i32,
    pub nama_supplier: String,
    pub alamat: Option<String>,
    pub kontak: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, max = 255, message = "Nama supplier harus 1-255 karakter"))]
    pub nama_supplier: String,
    pub alamat: Option<String>,
    pub kontak: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplierRequest {
    pub nama_supplier: Option<String>,
    pub alamat: Option<String>,
    pub kontak: Option<String>,
}

impl UpdateSupplierRequest {
    pub fn is_empty(&self) -> bool {
        self.nama_supplier.is_none() && self.alamat.is_none() && self.kontak.is_none()
    }
}

// ===== KARYAWAN =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Karyawan {
    pub id_karyawan: i32,
    pub nama_karyawan: String,
    pub jabatan: String,
    pub nip: Option<String>,
    pub no_hp: Option<String>,
    pub alamat: Option<String>,
    pub status_aktif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateKaryawanRequest {
    #[validate(length(min = 1, max = 255, message = "Nama karyawan harus 1-255 karakter"))]
    pub nama_karyawan: String,
    #[validate(length(min = 1, max = 100, message = "Jabatan harus 1-100 karakter"))]
    pub jabatan: String,
    pub nip: Option<String>,
    pub no_hp: Option<String>,
    pub alamat: Option<String>,
    pub status_aktif: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateKaryawanRequest {
    pub nama_karyawan: Option<String>,
    pub jabatan: Option<String>,
    pub nip: Option<String>,
    pub no_hp: Option<String>,
    pub alamat: Option<String>,
    pub status_aktif: Option<bool>,
}

impl UpdateKaryawanRequest {
    pub fn is_empty(&self) -> bool {
        self.nama_karyawan.is_none()
            && self.jabatan.is_none()
            && self.nip.is_none()
            && self.no_hp.is_none()
            && self.alamat.is_none()
            && self.status_aktif.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct KaryawanQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status_aktif: Option<bool>,
}

// ===== TRANSAKSI MASUK =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransaksiMasuk {
    pub id_transaksi_masuk: i32,
    pub tanggal_masuk: NaiveDate,
    pub id_supplier: Option<i32>,
    pub id_user: i32,
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetailTransaksiMasuk {
    pub id_detail_masuk: i32,
    pub id_transaksi_masuk: i32,
    pub id_barang: i32,
    pub jumlah: i32,
    pub harga_satuan: BigDecimal,
    pub tanggal_kadaluarsa: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DetailTransaksiMasuk {
    /// Subtotal baris = jumlah x harga_satuan, dihitung saat dibaca
    pub fn subtotal(&self) -> BigDecimal {
        BigDecimal::from(self.jumlah) * &self.harga_satuan
    }
}

/// Detail masuk beserta subtotal turunan untuk response
#[derive(Debug, Clone, Serialize)]
pub struct DetailMasukView {
    #[serde(flatten)]
    pub detail: DetailTransaksiMasuk,
    pub subtotal: BigDecimal,
}

impl From<DetailTransaksiMasuk> for DetailMasukView {
    fn from(detail: DetailTransaksiMasuk) -> Self {
        let subtotal = detail.subtotal();
        Self { detail, subtotal }
    }
}

#[derive(Debug, Serialize)]
pub struct TransaksiMasukWithDetails {
    #[serde(flatten)]
    pub transaksi: TransaksiMasuk,
    pub details: Vec<DetailMasukView>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransaksiMasukRequest {
    pub tanggal_masuk: NaiveDate,
    pub id_supplier: Option<i32>,
    pub keterangan: Option<String>,
    pub details: Vec<CreateDetailMasukRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDetailMasukRequest {
    pub id_barang: i32,
    pub jumlah: i32,
    pub harga_satuan: BigDecimal,
    pub tanggal_kadaluarsa: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransaksiMasukRequest {
    pub tanggal_masuk: Option<NaiveDate>,
    pub id_supplier: Option<i32>,
    pub keterangan: Option<String>,
}

impl UpdateTransaksiMasukRequest {
    pub fn is_empty(&self) -> bool {
        self.tanggal_masuk.is_none() && self.id_supplier.is_none() && self.keterangan.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDetailMasukRequest {
    pub id_barang: Option<i32>,
    pub jumlah: Option<i32>,
    pub harga_satuan: Option<BigDecimal>,
    pub tanggal_kadaluarsa: Option<NaiveDate>,
}

impl UpdateDetailMasukRequest {
    pub fn is_empty(&self) -> bool {
        self.id_barang.is_none()
            && self.jumlah.is_none()
            && self.harga_satuan.is_none()
            && self.tanggal_kadaluarsa.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct TransaksiMasukQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    pub id_supplier: Option<i32>,
}

// ===== TRANSAKSI KELUAR =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransaksiKeluar {
    pub id_transaksi_keluar: i32,
    pub tanggal_keluar: NaiveDate,
    pub tujuan: String,
    pub id_user: i32,
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetailTransaksiKeluar {
    pub id_detail_keluar: i32,
    pub id_transaksi_keluar: i32,
    pub id_barang: i32,
    pub jumlah: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TransaksiKeluarWithDetails {
    #[serde(flatten)]
    pub transaksi: TransaksiKeluar,
    pub details: Vec<DetailTransaksiKeluar>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransaksiKeluarRequest {
    pub tanggal_keluar: NaiveDate,
    pub tujuan: String,
    pub keterangan: Option<String>,
    pub details: Vec<CreateDetailKeluarRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDetailKeluarRequest {
    pub id_barang: i32,
    pub jumlah: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransaksiKeluarRequest {
    pub tanggal_keluar: Option<NaiveDate>,
    pub tujuan: Option<String>,
    pub keterangan: Option<String>,
}

impl UpdateTransaksiKeluarRequest {
    pub fn is_empty(&self) -> bool {
        self.tanggal_keluar.is_none() && self.tujuan.is_none() && self.keterangan.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDetailKeluarRequest {
    pub id_barang: Option<i32>,
    pub jumlah: Option<i32>,
}

impl UpdateDetailKeluarRequest {
    pub fn is_empty(&self) -> bool {
        self.id_barang.is_none() && self.jumlah.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct TransaksiKeluarQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    pub tujuan: Option<String>,
}

// ===== LOG ACTIVITY =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LogActivity {
    pub id_log: i32,
    pub id_user: Option<i32>,
    pub waktu: DateTime<Utc>,
    pub aksi: String,
    pub deskripsi: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateLogActivityRequest {
    pub id_user: Option<i32>,
    pub aksi: String,
    pub deskripsi: Option<String>,
    pub ip_address: Option<String>,
    pub waktu: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct LogActivityQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub id_user: Option<i32>,
    pub aksi: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LogStatistic {
    pub aksi: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct LogStatisticsQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CleanupQuery {
    #[serde(rename = "daysOld")]
    pub days_old: Option<i32>,
}

// ===== PERMISSION =====

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Permission {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub resource: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== API ENVELOPE =====

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;

        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Payload paginasi: data + meta, dibungkus lagi oleh ApiResponse
#[derive(Debug, Serialize)]
pub struct PaginatedData<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ===== HELPER FUNCTIONS =====

fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_subtotal_dihitung_dari_jumlah_kali_harga() {
        let detail = DetailTransaksiMasuk {
            id_detail_masuk: 1,
            id_transaksi_masuk: 1,
            id_barang: 1,
            jumlah: 100,
            harga_satuan: BigDecimal::from_str("500").unwrap(),
            tanggal_kadaluarsa: NaiveDate::from_ymd_opt(2025, 6, 1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(detail.subtotal(), BigDecimal::from_str("50000").unwrap());
    }

    #[test]
    fn test_subtotal_mengikuti_presisi_harga() {
        let detail = DetailTransaksiMasuk {
            id_detail_masuk: 2,
            id_transaksi_masuk: 1,
            id_barang: 2,
            jumlah: 3,
            harga_satuan: BigDecimal::from_str("1250.50").unwrap(),
            tanggal_kadaluarsa: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(detail.subtotal(), BigDecimal::from_str("3751.50").unwrap());
    }

    #[test]
    fn test_pagination_total_pages_dibulatkan_ke_atas() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 50, 101).total_pages, 3);
    }

    #[test]
    fn test_email_regex() {
        assert!(EMAIL_REGEX.is_match("alice@x.com"));
        assert!(EMAIL_REGEX.is_match("a.b@sub.domain.co"));
        assert!(!EMAIL_REGEX.is_match("alice@nodot"));
        assert!(!EMAIL_REGEX.is_match("no at sign"));
        assert!(!EMAIL_REGEX.is_match("@domain.com "));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(UpdateTransaksiMasukRequest::default().is_empty());
        assert!(!UpdateTransaksiMasukRequest {
            keterangan: Some("revisi".to_string()),
            ..Default::default()
        }
        .is_empty());

        assert!(UpdateBarangRequest::default().is_empty());
        assert!(UpdateDetailKeluarRequest::default().is_empty());
    }

    #[test]
    fn test_envelope_serialization() {
        let body = serde_json::to_value(ApiResponse::ok("Login successful", 42)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["data"], 42);
        assert!(body.get("error").is_none());

        let plain = serde_json::to_value(ApiResponse::message("Logged out successfully")).unwrap();
        assert!(plain.get("data").is_none());
    }
}
