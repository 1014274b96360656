use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::accounts::{validate_credentials, ExtraFields};
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateUser {
    pub email: String,
    /// Omitted for accounts that should not log in with a password yet.
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

pub async fn list_users(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_staff(&state).await?;
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

pub async fn create_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<Json<User>, AppError> {
    let caller = auth.require_staff(&state).await?;

    let wants_superuser = req.is_superuser == Some(true);
    if wants_superuser && !caller.is_superuser {
        return Err(AppError::Forbidden(
            "Only superusers can create superusers".to_string(),
        ));
    }

    validate_credentials(&req.email, req.password.as_deref())?;

    let extra = ExtraFields {
        is_active: req.is_active,
        is_staff: req.is_staff,
        is_superuser: req.is_superuser,
        first_name: req.first_name,
        last_name: req.last_name,
        display_name: req.display_name,
        account_created: None,
    };

    let user = if wants_superuser {
        state
            .users
            .create_superuser(&req.email, req.password.as_deref(), extra)
            .await?
    } else {
        state
            .users
            .create_user(&req.email, req.password.as_deref(), extra)
            .await?
    };

    tracing::info!(user_id = %user.id, created_by = %caller.id, "Account created by staff");
    Ok(Json(user))
}

/// Soft delete: the row stays, the account can no longer log in.
pub async fn deactivate_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let caller = auth.require_staff(&state).await?;

    if caller.id == id {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".to_string(),
        ));
    }

    let target = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if target.is_superuser && !caller.is_superuser {
        return Err(AppError::Forbidden(
            "Only superusers can deactivate superusers".to_string(),
        ));
    }

    let user = db::users::deactivate(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, deactivated_by = %caller.id, "Account deactivated");
    Ok(Json(user))
}
