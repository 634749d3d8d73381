// /apotek-inventory/services/inventory-api/src/utils/validator.rs

use crate::models::{CreateDetailKeluarRequest, CreateDetailMasukRequest, EMAIL_REGEX};
use crate::utils::error::{AppError, AppResult};
use bigdecimal::BigDecimal;

/// Validasi pagination parameters
pub fn validate_pagination(page: u32, limit: u32) -> AppResult<(u32, u32)> {
    if page == 0 {
        return Err(AppError::BadRequest("Page harus dimulai dari 1".to_string()));
    }

    if limit == 0 {
        return Err(AppError::BadRequest("Limit harus lebih besar dari 0".to_string()));
    }

    if limit > 100 {
        return Err(AppError::BadRequest("Limit maksimal 100 items per page".to_string()));
    }

    Ok((page, limit))
}

/// Validasi format email
pub fn validate_email(email: &str) -> AppResult<()> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    Ok(())
}

/// Validasi role user yang didukung
pub fn validate_role(role: &str) -> AppResult<()> {
    let valid_roles = ["admin", "manager", "user"];

    if !valid_roles.contains(&role) {
        return Err(AppError::BadRequest(
            format!("Role '{}' tidak valid. Valid: {:?}", role, valid_roles)
        ));
    }
    Ok(())
}

/// Validasi satuan barang
pub fn validate_satuan(satuan: &str) -> AppResult<()> {
    let valid_satuan = ["pcs", "botol", "tablet"];

    if !valid_satuan.contains(&satuan) {
        return Err(AppError::BadRequest(
            format!("Satuan '{}' tidak didukung. Valid: {:?}", satuan, valid_satuan)
        ));
    }
    Ok(())
}

/// Validasi jenis barang
pub fn validate_jenis(jenis: &str) -> AppResult<()> {
    let valid_jenis = ["obat", "alat_medis", "bahan_habis_pakai"];

    if !valid_jenis.contains(&jenis) {
        return Err(AppError::BadRequest(
            format!("Jenis '{}' tidak didukung. Valid: {:?}", jenis, valid_jenis)
        ));
    }
    Ok(())
}

/// Validasi satu baris detail transaksi masuk
pub fn validate_detail_masuk(detail: &CreateDetailMasukRequest) -> AppResult<()> {
    if detail.jumlah <= 0 {
        return Err(AppError::BadRequest("Jumlah harus lebih besar dari 0".to_string()));
    }

    if detail.harga_satuan < BigDecimal::from(0) {
        return Err(AppError::BadRequest("Harga satuan tidak boleh negatif".to_string()));
    }

    Ok(())
}

/// Validasi seluruh baris detail transaksi masuk sebelum menulis apa pun
pub fn validate_detail_masuk_lines(details: &[CreateDetailMasukRequest]) -> AppResult<()> {
    if details.is_empty() {
        return Err(AppError::BadRequest(
            "Tanggal masuk dan detail transaksi wajib diisi".to_string(),
        ));
    }

    for detail in details {
        validate_detail_masuk(detail)?;
    }

    Ok(())
}

/// Validasi satu baris detail transaksi keluar
pub fn validate_detail_keluar(detail: &CreateDetailKeluarRequest) -> AppResult<()> {
    if detail.jumlah <= 0 {
        return Err(AppError::BadRequest("Jumlah harus lebih besar dari 0".to_string()));
    }
    Ok(())
}

/// Validasi seluruh baris detail transaksi keluar
pub fn validate_detail_keluar_lines(details: &[CreateDetailKeluarRequest]) -> AppResult<()> {
    if details.is_empty() {
        return Err(AppError::BadRequest(
            "Tanggal keluar dan detail transaksi wajib diisi".to_string(),
        ));
    }

    for detail in details {
        validate_detail_keluar(detail)?;
    }

    Ok(())
}

/// Validasi string wajib tidak kosong
pub fn validate_required(value: &str, field_name: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} tidak boleh kosong", field_name)));
    }
    Ok(())
}

/// Validasi daysOld untuk pembersihan log
pub fn validate_days_old(days: i32) -> AppResult<i32> {
    if days <= 0 {
        return Err(AppError::BadRequest("daysOld harus lebih besar dari 0".to_string()));
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn detail_masuk(jumlah: i32, harga: &str) -> CreateDetailMasukRequest {
        CreateDetailMasukRequest {
            id_barang: 1,
            jumlah,
            harga_satuan: BigDecimal::from_str(harga).unwrap(),
            tanggal_kadaluarsa: None,
        }
    }

    #[test]
    fn test_validate_pagination() {
        assert!(validate_pagination(1, 10).is_ok());
        assert!(validate_pagination(0, 10).is_err());
        assert!(validate_pagination(1, 0).is_err());
        assert!(validate_pagination(1, 101).is_err());
    }

    #[test]
    fn test_validate_role() {
        assert!(validate_role("admin").is_ok());
        assert!(validate_role("manager").is_ok());
        assert!(validate_role("user").is_ok());
        assert!(validate_role("superuser").is_err());
    }

    #[test]
    fn test_validate_satuan_dan_jenis() {
        assert!(validate_satuan("botol").is_ok());
        assert!(validate_satuan("dus").is_err());
        assert!(validate_jenis("obat").is_ok());
        assert!(validate_jenis("makanan").is_err());
    }

    #[test]
    fn test_detail_masuk_jumlah_harus_positif() {
        assert!(validate_detail_masuk(&detail_masuk(1, "0")).is_ok());
        assert!(validate_detail_masuk(&detail_masuk(0, "500")).is_err());
        assert!(validate_detail_masuk(&detail_masuk(-3, "500")).is_err());
    }

    #[test]
    fn test_detail_masuk_harga_tidak_boleh_negatif() {
        assert!(validate_detail_masuk(&detail_masuk(10, "500")).is_ok());
        assert!(validate_detail_masuk(&detail_masuk(10, "-0.01")).is_err());
    }

    #[test]
    fn test_detail_lines_kosong_ditolak() {
        assert!(validate_detail_masuk_lines(&[]).is_err());
        assert!(validate_detail_keluar_lines(&[]).is_err());

        let lines = vec![detail_masuk(100, "500")];
        assert!(validate_detail_masuk_lines(&lines).is_ok());
    }

    #[test]
    fn test_detail_keluar_jumlah_harus_positif() {
        let valid = CreateDetailKeluarRequest { id_barang: 1, jumlah: 5 };
        let invalid = CreateDetailKeluarRequest { id_barang: 1, jumlah: 0 };

        assert!(validate_detail_keluar(&valid).is_ok());
        assert!(validate_detail_keluar(&invalid).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@x.com").is_ok());
        assert!(validate_email("bukan-email").is_err());
        assert!(validate_email("user@tanpa-titik").is_err());
    }

    #[test]
    fn test_validate_days_old() {
        assert!(validate_days_old(30).is_ok());
        assert!(validate_days_old(0).is_err());
        assert!(validate_days_old(-7).is_err());
    }
}
