// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event routes. Every event belongs to the user who created it.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::event::{EventPatch, NewEvent};
use crate::models::{Event, Permission};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

async fn owned_event(state: &AppState, user: &AuthUser, id: &str) -> Result<Event> {
    state
        .db
        .get_event(&user.uid, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))
}

async fn list_events(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Event>>> {
    user.require(Permission::ManageEvents)?;
    Ok(Json(state.db.list_events(&user.uid).await?))
}

async fn get_event(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Event>> {
    user.require(Permission::ManageEvents)?;
    Ok(Json(owned_event(&state, &user, &id).await?))
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(event): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>)> {
    user.require(Permission::ManageEvents)?;
    event.validate()?;

    let created = state.db.create_event(&user.uid, event).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_event(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>> {
    user.require(Permission::ManageEvents)?;
    patch.validate()?;

    let current = owned_event(&state, &user, &id).await?;
    if let Err(e) = patch.check_capacity_against(&current) {
        let mut errors = ValidationErrors::new();
        errors.add("max_attendees", e);
        return Err(errors.into());
    }

    Ok(Json(state.db.update_event(&id, patch).await?))
}

async fn delete_event(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    user.require(Permission::ManageEvents)?;

    owned_event(&state, &user, &id).await?;
    state.db.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
