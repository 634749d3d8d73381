// /apotek-inventory/services/inventory-api/src/core/security.rs

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::utils::error::{AppError, AppResult};

/// Layanan keamanan untuk handling password
pub struct SecurityService {
    argon2: Argon2<'static>,
}

impl SecurityService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash password dengan salt acak
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AppError::Internal("Password hashing failed".to_string()))?;

        Ok(password_hash.to_string())
    }

    /// Verifikasi password dengan proteksi timing attack
    pub async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Stored password hash is malformed".to_string()))?;

        let result = self.argon2.verify_password(password.as_bytes(), &parsed_hash);

        // Delay konstan untuk mencegah timing attack
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(result.is_ok())
    }
}

impl Default for SecurityService {
    fn default() -> Self {
        Self::new()
    }
}

/// Kumpulkan daftar aturan password yang dilanggar
pub fn validate_password_strength(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }

    errors
}

/// Tolak password lemah dengan daftar pelanggaran yang digabung
pub fn check_password_strength(password: &str) -> AppResult<()> {
    let errors = validate_password_strength(password);

    if !errors.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Password validation failed: {}",
            errors.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_delapan_karakter_diterima() {
        assert!(check_password_strength("password1").is_ok());
        assert!(check_password_strength("12345678").is_ok());
    }

    #[test]
    fn test_password_pendek_ditolak_dengan_daftar_aturan() {
        let err = check_password_strength("1234567").unwrap_err();
        let message = format!("{}", err);

        assert!(message.contains("Password validation failed"));
        assert!(message.contains("at least 8 characters"));
    }

    #[tokio::test]
    async fn test_hash_dan_verify_roundtrip() {
        let service = SecurityService::new();
        let hash = service.hash_password("password1").unwrap();

        assert_ne!(hash, "password1");
        assert!(service.verify_password("password1", &hash).await.unwrap());
        assert!(!service.verify_password("wrong-password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_rusak_jadi_error() {
        let service = SecurityService::new();
        assert!(service.verify_password("password1", "bukan-hash").await.is_err());
    }
}
