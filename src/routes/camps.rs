// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp catalogue and camp administration routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::camp::{CampFilter, CampPatch, NewCamp};
use crate::models::{Camp, Permission};
use crate::services::CampSummary;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/camps", get(list_camps))
        .route("/api/camps/{id}", get(get_camp))
        .route("/api/admin/camps", post(create_camp))
        .route("/api/admin/camps/{id}", put(update_camp).delete(delete_camp))
}

/// Catalogue listing with filters.
async fn list_camps(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<CampFilter>,
) -> Result<Json<Vec<CampSummary>>> {
    let camps = state.catalog.list_camps(&user, &filter).await?;
    Ok(Json(camps))
}

async fn get_camp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CampSummary>> {
    Ok(Json(state.catalog.get_camp(&id).await?))
}

async fn create_camp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(camp): Json<NewCamp>,
) -> Result<(StatusCode, Json<Camp>)> {
    user.require(Permission::ManageCamps)?;
    camp.validate()?;
    state.catalog.ensure_camp_type_exists(&camp.camp_type).await?;

    let created = state.db.create_camp(camp).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; only the fields present in the body are written.
async fn update_camp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<CampPatch>,
) -> Result<Json<Camp>> {
    user.require(Permission::ManageCamps)?;
    user.require(Permission::EditAllCamps)?;
    patch.validate()?;

    let current = state
        .db
        .get_camp(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Camp {id} not found")))?;

    if let Err(e) = patch.check_dates_against(&current) {
        let mut errors = ValidationErrors::new();
        errors.add("end_date", e);
        return Err(errors.into());
    }

    if let Some(camp_type) = patch.camp_type.as_deref() {
        state.catalog.ensure_camp_type_exists(camp_type).await?;
    }

    let updated = state.db.update_camp(&id, patch).await?;
    Ok(Json(updated))
}

async fn delete_camp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    user.require(Permission::DeleteCamps)?;

    if state.db.get_camp(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Camp {id} not found")));
    }

    state.db.delete_camp(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
