// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp type routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::camp_type::{default_camp_types, CampTypePatch, NewCampType};
use crate::models::{CampType, Permission};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/camp-types", get(list_active))
        .route("/api/admin/camp-types", get(list_all).post(create))
        .route("/api/admin/camp-types/seed", post(seed))
        .route("/api/admin/camp-types/{id}", put(update).delete(remove))
}

/// Active camp types, for filters and forms.
async fn list_active(State(state): State<Arc<AppState>>) -> Result<Json<Vec<CampType>>> {
    Ok(Json(state.db.list_active_camp_types().await?))
}

async fn list_all(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CampType>>> {
    user.require(Permission::ManageCamps)?;
    Ok(Json(state.db.list_camp_types().await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(camp_type): Json<NewCampType>,
) -> Result<(StatusCode, Json<CampType>)> {
    user.require(Permission::ManageCamps)?;
    camp_type.validate()?;

    let created = state.db.create_camp_type(camp_type).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<CampTypePatch>,
) -> Result<Json<CampType>> {
    user.require(Permission::ManageCamps)?;
    patch.validate()?;

    if state.db.get_camp_type(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Camp type {id} not found")));
    }

    Ok(Json(state.db.update_camp_type(&id, patch).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    user.require(Permission::ManageCamps)?;

    if state.db.get_camp_type(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Camp type {id} not found")));
    }

    state.db.delete_camp_type(&id).await?;
    tracing::info!(camp_type_id = %id, uid = %user.uid, "Deleted camp type");
    Ok(StatusCode::NO_CONTENT)
}

/// Insert the default camp types into an empty collection.
async fn seed(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CampType>>> {
    user.require(Permission::ManageUsers)?;
    Ok(Json(state.db.seed_camp_types(default_camp_types()).await?))
}
