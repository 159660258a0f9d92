// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User administration routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Permission, Role, UserProfile};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/role-by-email", put(set_role_by_email))
        .route("/api/admin/users/{uid}/role", put(set_role))
}

#[derive(Deserialize)]
struct UsersQuery {
    role: Option<Role>,
}

#[derive(Deserialize)]
struct RoleUpdate {
    role: Role,
}

#[derive(Deserialize, Validate)]
struct RoleByEmailUpdate {
    #[validate(email(message = "Некорректный email"))]
    email: String,
    role: Role,
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<UserProfile>>> {
    user.require(Permission::ManageUsers)?;

    let profiles = match query.role {
        Some(role) => state.db.list_user_profiles_by_role(role).await?,
        None => state.db.list_user_profiles().await?,
    };
    Ok(Json(profiles))
}

/// Change a user's role. Applies to the user's next request.
async fn set_role(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(uid): Path<String>,
    Json(update): Json<RoleUpdate>,
) -> Result<Json<UserProfile>> {
    user.require(Permission::ManageUsers)?;

    let profile = state
        .db
        .update_user_role(&uid, update.role)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {uid} not found")))?;

    tracing::info!(admin = %user.uid, target = %uid, role = %update.role, "Role changed");
    Ok(Json(profile))
}

async fn set_role_by_email(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<RoleByEmailUpdate>,
) -> Result<Json<UserProfile>> {
    user.require(Permission::ManageUsers)?;
    update.validate()?;

    let profile = state
        .db
        .set_user_role_by_email(update.email.trim(), update.role)
        .await?;

    tracing::info!(admin = %user.uid, target = %profile.uid, role = %update.role, "Role changed by email");
    Ok(Json(profile))
}
