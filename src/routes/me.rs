// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes for the signed-in user's own profile.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::UpdateUserProfile;
use crate::models::UserProfile;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/me/bootstrap-admin", post(bootstrap_admin))
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_user_profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.uid)))?;
    Ok(Json(profile))
}

/// Update display name and photo.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<UpdateUserProfile>,
) -> Result<Json<UserProfile>> {
    update.validate()?;

    let profile = state
        .db
        .update_user_profile(&user.uid, update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.uid)))?;
    Ok(Json(profile))
}

/// Make the caller the first admin, if there is none yet.
async fn bootstrap_admin(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .bootstrap_first_admin(&user.uid)
        .await?
        .ok_or_else(|| AppError::Conflict("Администратор уже существует".to_string()))?;

    tracing::info!(uid = %user.uid, "Bootstrapped first admin");
    Ok(Json(profile))
}
