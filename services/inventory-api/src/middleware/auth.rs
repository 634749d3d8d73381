// /apotek-inventory/services/inventory-api/src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{utils::error::AppError, AppState};

/// Actor terautentikasi yang ditempel ke request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Middleware untuk validasi bearer token pada protected endpoints
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    // Skip auth untuk public endpoints
    if is_public_endpoint(&path) {
        return Ok(next.run(req).await);
    }

    let token = extract_bearer_token(&req)?;

    let claims = state.jwt_service.verify_token(&token).map_err(|e| {
        tracing::warn!("JWT verification failed on {}", path);
        e
    })?;

    let user_id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    // Token tidak dipercaya sebagai cache status aktif; cek ulang ke database
    let user = state
        .repository
        .user()
        .find_active_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found or inactive".to_string()))?;

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(req).await)
}

/// Guard untuk route yang hanya boleh diakses admin
pub async fn require_admin(
    Extension(user): Extension<AuthUser>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != "admin" {
        tracing::warn!(
            "User {} (role: {}) attempted admin access: {}",
            user.id,
            user.role,
            req.uri().path()
        );
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}

/// Helper untuk check apakah endpoint public (no auth required)
fn is_public_endpoint(path: &str) -> bool {
    let public_paths = [
        "/api",
        "/api/health",
        "/api/auth/register",
        "/api/auth/login",
        "/api/auth/refresh",
        "/api/auth/logout",
    ];

    public_paths.iter().any(|&public_path| path == public_path)
}

/// Helper untuk extract bearer token dari request header
fn extract_bearer_token(req: &Request) -> Result<String, AppError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header encoding".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization header must start with 'Bearer '".to_string())
        })?;

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/barang");
        if let Some(value) = value {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_public_endpoint_classification() {
        assert!(is_public_endpoint("/api/health"));
        assert!(is_public_endpoint("/api/auth/login"));
        assert!(is_public_endpoint("/api/auth/refresh"));
        assert!(is_public_endpoint("/api/auth/logout"));

        assert!(!is_public_endpoint("/api/auth/logout-all"));
        assert!(!is_public_endpoint("/api/auth/profile"));
        assert!(!is_public_endpoint("/api/transaksi-masuk"));
        assert!(!is_public_endpoint("/api/logs"));
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&req).unwrap(), "abc.def.ghi");

        let missing = request_with_auth(None);
        assert!(extract_bearer_token(&missing).is_err());

        let wrong_scheme = request_with_auth(Some("Basic dXNlcjpwdw=="));
        assert!(extract_bearer_token(&wrong_scheme).is_err());
    }
}
