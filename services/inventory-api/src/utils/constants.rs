// /apotek-inventory/services/inventory-api/src/utils/constants.rs

pub mod constants {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Default page size untuk listing log aktivitas
    pub const DEFAULT_LOG_PAGE_SIZE: u32 = 50;

    /// Umur refresh token dalam hari
    pub const REFRESH_TOKEN_DAYS: i64 = 7;

    /// Default umur log sebelum dibersihkan (hari)
    pub const DEFAULT_LOG_RETENTION_DAYS: i32 = 30;
}
