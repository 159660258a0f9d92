// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking request routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::booking::{BookingStatusUpdate, NewBookingRequest};
use crate::models::{BookingRequest, Permission};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/camps/{id}/bookings", post(submit))
        .route("/api/camps/{id}/bookings/exists", get(exists))
        .route("/api/admin/bookings", get(list_all))
        .route("/api/admin/camps/{id}/bookings", get(list_for_camp))
        .route("/api/admin/bookings/{id}/status", put(update_status))
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(camp_id): Path<String>,
    Json(request): Json<NewBookingRequest>,
) -> Result<(StatusCode, Json<BookingRequest>)> {
    request.validate()?;

    let booking = state.bookings.submit(&user, &camp_id, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Deserialize)]
struct ExistsQuery {
    contact: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BookingExistsResponse {
    pub exists: bool,
}

/// Lets the booking form show "already responded" before submitting.
///
/// Only the caller's own requests count unless they manage camps.
async fn exists(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(camp_id): Path<String>,
    Query(query): Query<ExistsQuery>,
) -> Result<Json<BookingExistsResponse>> {
    if query.contact.trim().is_empty() {
        return Err(AppError::BadRequest("Контакт обязателен".to_string()));
    }

    let exists = state
        .bookings
        .has_request_visible_to(&user, &camp_id, &query.contact)
        .await;
    Ok(Json(BookingExistsResponse { exists }))
}

async fn list_all(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BookingRequest>>> {
    user.require(Permission::ManageCamps)?;
    Ok(Json(state.db.list_booking_requests().await?))
}

async fn list_for_camp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(camp_id): Path<String>,
) -> Result<Json<Vec<BookingRequest>>> {
    user.require(Permission::ManageCamps)?;
    Ok(Json(state.db.list_booking_requests_for_camp(&camp_id).await?))
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(booking_id): Path<String>,
    Json(update): Json<BookingStatusUpdate>,
) -> Result<Json<BookingRequest>> {
    user.require(Permission::ManageCamps)?;

    let booking = state.bookings.transition(&booking_id, update.status).await?;
    Ok(Json(booking))
}
