// /apotek-inventory/services/inventory-api/src/utils/cors.rs

use axum::http::{header, HeaderValue, Method};
use std::env;
use tower_http::cors::CorsLayer;

/// Setup CORS layer untuk SPA client
pub fn create_cors_layer() -> CorsLayer {
    let origins = parse_allowed_origins();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(get_allowed_methods())
        .allow_headers(get_allowed_headers())
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Parse origins dari environment variable
fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173".to_string());

    origins_str
        .split(',')
        .filter_map(|origin| {
            let trimmed = origin.trim();
            match trimmed.parse::<HeaderValue>() {
                Ok(header) => {
                    tracing::debug!("CORS origin registered: {}", trimmed);
                    Some(header)
                }
                Err(e) => {
                    tracing::warn!("Invalid origin format '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

fn get_allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

/// Explicit list required karena allow_credentials(true)
fn get_allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        header::ORIGIN,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_methods_mencakup_mutasi() {
        let methods = get_allowed_methods();
        assert!(methods.contains(&Method::GET));
        assert!(methods.contains(&Method::POST));
        assert!(methods.contains(&Method::PUT));
        assert!(methods.contains(&Method::DELETE));
    }

    #[test]
    fn test_allowed_headers_mengandung_authorization() {
        assert!(get_allowed_headers().contains(&header::AUTHORIZATION));
    }
}
