// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Organizer routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::organizer::{NewOrganizer, OrganizerPatch};
use crate::models::{Organizer, Permission};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/organizers", get(list_active))
        .route("/api/admin/organizers", get(list_all).post(create))
        .route(
            "/api/admin/organizers/{id}",
            get(get_one).put(update).delete(remove),
        )
}

async fn list_active(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Organizer>>> {
    Ok(Json(state.db.list_active_organizers().await?))
}

async fn list_all(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Organizer>>> {
    user.require(Permission::ManageCamps)?;
    Ok(Json(state.db.list_organizers().await?))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Organizer>> {
    user.require(Permission::ManageCamps)?;
    let organizer = state
        .db
        .get_organizer(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Organizer {id} not found")))?;
    Ok(Json(organizer))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(organizer): Json<NewOrganizer>,
) -> Result<(StatusCode, Json<Organizer>)> {
    user.require(Permission::ManageCamps)?;
    organizer.validate()?;

    let created = state.db.create_organizer(organizer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<OrganizerPatch>,
) -> Result<Json<Organizer>> {
    user.require(Permission::ManageCamps)?;
    patch.validate()?;

    if state.db.get_organizer(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Organizer {id} not found")));
    }

    Ok(Json(state.db.update_organizer(&id, patch).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    user.require(Permission::ManageCamps)?;

    if state.db.get_organizer(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Organizer {id} not found")));
    }

    state.db.delete_organizer(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
