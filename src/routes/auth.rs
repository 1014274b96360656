use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::accounts::{normalize_email, validate_credentials, ExtraFields};
use crate::auth::extractor::{AuthUser, ACCESS_COOKIE};
use crate::auth::jwt::{encode_token, Claims};
use crate::config::RegistrationMode;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn access_cookie(token: &str) -> CookieJar {
    let cookie = Cookie::build((ACCESS_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    CookieJar::new().add(cookie)
}

fn clear_access_cookie() -> CookieJar {
    let mut cookie = Cookie::build((ACCESS_COOKIE, "")).path("/").build();
    cookie.make_removal();
    CookieJar::new().add(cookie)
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, AppError> {
    if state.config.registration == RegistrationMode::Closed {
        return Err(AppError::Forbidden(
            "Registration is disabled. Contact your administrator.".to_string(),
        ));
    }

    validate_credentials(&req.email, Some(&req.password))?;

    let extra = ExtraFields {
        first_name: req.first_name,
        last_name: req.last_name,
        display_name: req.display_name,
        ..Default::default()
    };
    let user = state
        .users
        .create_user(&req.email, Some(&req.password), extra)
        .await?;

    Ok(Json(user))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let email = normalize_email(&req.email);
    let mut user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active || !user.check_password(&req.password) {
        tracing::debug!(user_id = %user.id, "Rejected login attempt");
        return Err(invalid());
    }

    db::users::touch_last_login(&state.pool, user.id).await?;
    user.last_login = Some(chrono::Utc::now());

    let claims = Claims::new(user.id, user.email.clone());
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        access_cookie(&access_token),
        Json(LoginResponse { access_token, user }),
    ))
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_access_cookie(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    Ok(Json(auth.load(&state).await?))
}
