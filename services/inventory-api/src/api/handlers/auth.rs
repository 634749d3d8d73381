// /apotek-inventory/services/inventory-api/src/api/handlers/auth.rs

use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use std::net::SocketAddr;
use validator::Validate;

use crate::{
    core::{jwt::JwtService, security},
    middleware::auth::AuthUser,
    models::*,
    utils::{
        audit::record_activity,
        error::{AppError, AppResult},
        validator as utils_validator,
    },
    AppState,
};

/// Handler untuk registrasi user baru
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    payload.validate()?;
    security::check_password_strength(&payload.password)?;

    let role = payload.role.clone().unwrap_or_else(|| "user".to_string());
    utils_validator::validate_role(&role)?;

    // Cek identitas unik sebelum menulis
    if state.repository.user().find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    if state
        .repository
        .user()
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = state.security_service.hash_password(&payload.password)?;

    let user = state
        .repository
        .user()
        .create(
            &payload.username,
            &payload.email,
            &password_hash,
            &role,
            payload.id_karyawan,
        )
        .await?;

    let tokens = state.jwt_service.generate_token_pair(&user)?;

    state
        .repository
        .refresh_token()
        .create(user.id, &tokens.refresh_token, JwtService::refresh_token_expiry())
        .await?;

    record_activity(
        &state.repository,
        Some(user.id),
        "REGISTER",
        Some(format!("User {} terdaftar", user.username)),
        Some(addr.ip().to_string()),
    )
    .await;

    tracing::info!("New user registered: {} ({})", user.username, user.email);

    let response = AuthResponse {
        user: UserPublic::from(user),
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully", response)),
    ))
}

/// Handler untuk login
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    payload.validate()?;

    let user = state
        .repository
        .user()
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let password_valid = state
        .security_service
        .verify_password(&payload.password, &user.password)
        .await?;

    if !password_valid {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is deactivated".to_string()));
    }

    // Sesi lama dibiarkan hidup: multi-device memang didukung
    let tokens = state.jwt_service.generate_token_pair(&user)?;

    state
        .repository
        .refresh_token()
        .create(user.id, &tokens.refresh_token, JwtService::refresh_token_expiry())
        .await?;

    record_activity(
        &state.repository,
        Some(user.id),
        "LOGIN",
        Some(format!("User {} login", user.username)),
        Some(addr.ip().to_string()),
    )
    .await;

    let response = AuthResponse {
        user: UserPublic::from(user),
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };

    Ok(Json(ApiResponse::ok("Login successful", response)))
}

/// Handler untuk refresh access token
/// POST /api/auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<ApiResponse<RefreshTokenResponse>>> {
    let refresh_token = payload
        .refresh_token
        .ok_or_else(|| AppError::BadRequest("Refresh token is required".to_string()))?;

    let token_record = state
        .repository
        .refresh_token()
        .find_valid(&refresh_token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let user = state
        .repository
        .user()
        .find_by_id(token_record.user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::Unauthorized("User not found or inactive".to_string()))?;

    // Hanya access token baru; refresh token yang sama tetap dipakai (tanpa rotasi)
    let new_access_token = state.jwt_service.generate_access_token(&user)?;

    let response = RefreshTokenResponse {
        token: new_access_token,
        refresh_token,
    };

    Ok(Json(ApiResponse::ok("Token refreshed successfully", response)))
}

/// Handler untuk logout (revoke refresh token); idempoten
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Option<Json<LogoutRequest>>,
) -> AppResult<Json<ApiResponse<()>>> {
    let refresh_token = payload.and_then(|Json(body)| body.refresh_token);

    if let Some(ref token) = refresh_token {
        state.repository.refresh_token().revoke(token).await?;

        record_activity(
            &state.repository,
            None,
            "LOGOUT",
            None,
            Some(addr.ip().to_string()),
        )
        .await;
    }

    Ok(Json(ApiResponse::message("Logged out successfully")))
}

/// Handler untuk logout dari semua perangkat
/// POST /api/auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<()>>> {
    let revoked = state
        .repository
        .refresh_token()
        .revoke_all_for_user(user.id)
        .await?;

    tracing::info!("User {} revoked {} refresh tokens", user.id, revoked);

    record_activity(
        &state.repository,
        Some(user.id),
        "LOGOUT_ALL",
        Some(format!("{} token dicabut", revoked)),
        Some(addr.ip().to_string()),
    )
    .await;

    Ok(Json(ApiResponse::message(
        "Logged out from all devices successfully",
    )))
}

/// Handler untuk mengambil profil user yang sedang login
/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<UserPublic>>> {
    let user = state
        .repository
        .user()
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Profile retrieved successfully",
        UserPublic::from(user),
    )))
}

/// Handler untuk update profil (username/email)
/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserPublic>>> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No valid fields to update".to_string()));
    }

    payload.validate()?;

    // Username/email hanya boleh bentrok dengan milik sendiri
    if let Some(ref email) = payload.email {
        if let Some(existing) = state.repository.user().find_by_email(email).await? {
            if existing.id != auth_user.id {
                return Err(AppError::Conflict(
                    "Email already taken by another user".to_string(),
                ));
            }
        }
    }

    if let Some(ref username) = payload.username {
        if let Some(existing) = state.repository.user().find_by_username(username).await? {
            if existing.id != auth_user.id {
                return Err(AppError::Conflict(
                    "Username already taken by another user".to_string(),
                ));
            }
        }
    }

    let patch = UpdateUserRequest {
        username: payload.username,
        email: payload.email,
        role: None,
        is_active: None,
        id_karyawan: None,
    };

    let user = state
        .repository
        .user()
        .update(auth_user.id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    record_activity(
        &state.repository,
        Some(auth_user.id),
        "UPDATE_PROFILE",
        Some(format!("User {} memperbarui profil", user.username)),
        None,
    )
    .await;

    Ok(Json(ApiResponse::ok(
        "Profile updated successfully",
        UserPublic::from(user),
    )))
}

/// Handler untuk ganti password
/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return Err(AppError::BadRequest(
            "Current password and new password are required".to_string(),
        ));
    }

    security::check_password_strength(&payload.new_password)?;

    let user = state
        .repository
        .user()
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let current_valid = state
        .security_service
        .verify_password(&payload.current_password, &user.password)
        .await?;

    if !current_valid {
        return Err(AppError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = state.security_service.hash_password(&payload.new_password)?;
    state
        .repository
        .user()
        .update_password(auth_user.id, &new_hash)
        .await?;

    record_activity(
        &state.repository,
        Some(auth_user.id),
        "CHANGE_PASSWORD",
        None,
        None,
    )
    .await;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// Handler untuk daftar permission milik role user saat ini
/// GET /api/auth/permissions
pub async fn get_user_permissions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<Vec<Permission>>>> {
    let permissions = state.repository.permission().find_by_role(&user.role).await?;

    Ok(Json(ApiResponse::ok(
        "Permissions retrieved successfully",
        permissions,
    )))
}
