// /apotek-inventory/services/inventory-api/src/core/jwt.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use std::env;

use crate::models::{Claims, User};
use crate::utils::constants::constants::REFRESH_TOKEN_DAYS;
use crate::utils::error::{AppError, AppResult};

/// Pasangan kredensial yang diterbitkan saat register/login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Service untuk generate dan verify access token.
/// Refresh token bukan JWT: string acak yang divalidasi lewat database,
/// sehingga bisa dicabut server-side kapan pun.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl JwtService {
    /// Setup JWT service dengan secret dari environment
    pub fn new() -> AppResult<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::Configuration("JWT_SECRET environment variable not set".to_string()))?;

        let issuer = env::var("JWT_ISSUER")
            .unwrap_or_else(|_| "inventory-api".to_string());
        let audience = env::var("JWT_AUDIENCE")
            .unwrap_or_else(|_| "inventory-app".to_string());

        Self::with_secret(&secret, &issuer, &audience)
    }

    pub fn with_secret(secret: &str, issuer: &str, audience: &str) -> AppResult<Self> {
        if secret.len() < 32 {
            return Err(AppError::Configuration(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.validate_exp = true;
        validation.leeway = 60;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        })
    }

    /// Generate access token untuk user
    pub fn generate_access_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let exp_hours = env::var("JWT_EXPIRES_IN")
            .unwrap_or_else(|_| "24h".to_string())
            .trim_end_matches('h')
            .parse::<i64>()
            .unwrap_or(24);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: (now + Duration::hours(exp_hours)).timestamp() as usize,
            iat: now.timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Verify access token dan kembalikan claims
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expired".to_string(),
                _ => "Invalid token".to_string(),
            }))?;

        Ok(token_data.claims)
    }

    /// Generate token pair: access JWT + refresh token opaque
    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: Self::generate_refresh_token(),
        })
    }

    /// Refresh token: 64 byte acak, di-hex-encode (entropi 512 bit).
    /// Tidak pernah di-decode; validitasnya murni lookup database.
    pub fn generate_refresh_token() -> String {
        let mut bytes = [0u8; 64];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Waktu kedaluwarsa refresh token baru
    pub fn refresh_token_expiry() -> chrono::DateTime<Utc> {
        Utc::now() + Duration::days(REFRESH_TOKEN_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    const SECRET: &str = "unit-test-secret-with-enough-length-123456";

    fn test_user() -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "hash".to_string(),
            role: "admin".to_string(),
            is_active: true,
            id_karyawan: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service() -> JwtService {
        JwtService::with_secret(SECRET, "inventory-api", "inventory-app").unwrap()
    }

    #[test]
    fn test_secret_pendek_ditolak() {
        assert!(JwtService::with_secret("short", "iss", "aud").is_err());
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let token = service.generate_access_token(&test_user()).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_token_dimanipulasi_ditolak() {
        let service = service();
        let token = service.generate_access_token(&test_user()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(service.verify_token(&tampered).is_err());

        let other = JwtService::with_secret(
            "another-secret-with-enough-length-654321",
            "inventory-api",
            "inventory-app",
        )
        .unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_kedaluwarsa_ditolak() {
        let service = service();

        // Token dengan exp jauh di masa lalu, ditandatangani dengan secret yang sama
        let now = Utc::now();
        let claims = Claims {
            sub: "7".to_string(),
            email: "alice@x.com".to_string(),
            role: "admin".to_string(),
            exp: (now - Duration::hours(2)).timestamp() as usize,
            iat: (now - Duration::hours(3)).timestamp() as usize,
            iss: "inventory-api".to_string(),
            aud: "inventory-app".to_string(),
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service.verify_token(&expired).is_err());
    }

    #[test]
    fn test_refresh_token_64_byte_hex_dan_unik() {
        let first = JwtService::generate_refresh_token();
        let second = JwtService::generate_refresh_token();

        assert_eq!(first.len(), 128);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn test_refresh_token_expiry_tujuh_hari() {
        let expiry: DateTime<Utc> = JwtService::refresh_token_expiry();
        let delta = expiry - Utc::now();

        assert!(delta > Duration::days(6));
        assert!(delta <= Duration::days(7));
    }
}
