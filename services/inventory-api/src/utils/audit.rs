// /apotek-inventory/services/inventory-api/src/utils/audit.rs

use crate::models::CreateLogActivityRequest;
use crate::repository::Repository;

/// Catat aktivitas sebagai side effect best-effort.
/// Kegagalan penulisan log tidak boleh menggagalkan operasi yang dicatat.
pub async fn record_activity(
    repository: &Repository,
    id_user: Option<i32>,
    aksi: &str,
    deskripsi: Option<String>,
    ip_address: Option<String>,
) {
    let request = CreateLogActivityRequest {
        id_user,
        aksi: aksi.to_string(),
        deskripsi,
        ip_address,
        waktu: None,
    };

    if let Err(e) = repository.log_activity().create(request).await {
        tracing::warn!("Gagal mencatat log aktivitas '{}': {}", aksi, e);
    }
}
