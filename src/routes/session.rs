// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: exchange an identity-provider ID token for a session.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::UserProfile;
use crate::services::IdentityError;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// ID token; falls back to the `Authorization: Bearer` header
    #[serde(default)]
    pub id_token: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub token: String,
    pub profile: UserProfile,
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Invalid(reason) => {
                tracing::info!(reason = %reason, "Rejected identity token");
                AppError::InvalidToken
            }
            IdentityError::Transient(reason) => {
                AppError::Internal(anyhow::anyhow!("identity provider unavailable: {reason}"))
            }
        }
    }
}

/// Issue a session token for `profile` and attach it as a cookie.
fn issue_session(
    state: &AppState,
    jar: CookieJar,
    profile: UserProfile,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(
        &profile.uid,
        &profile.email,
        &state.config.jwt_signing_key,
        state.config.session_ttl_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .http_only(true)
        .secure(state.config.secure_cookies())
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::hours(state.config.session_ttl_hours as i64))
        .build();

    Ok((jar.add(cookie), Json(SessionResponse { token, profile })))
}

/// Verify the ID token, make sure a profile exists and start a session.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<SessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let identity = match body.id_token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => state.identity_verifier.verify_id_token(token).await?,
        None => {
            state
                .identity_verifier
                .verify_bearer(headers.get(header::AUTHORIZATION))
                .await?
        }
    };

    let profile = state
        .db
        .ensure_user_profile(
            &identity.uid,
            &identity.email,
            identity.display_name,
            identity.photo_url,
        )
        .await?;

    tracing::info!(uid = %profile.uid, role = %profile.role, "Session started");

    issue_session(&state, jar, profile)
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}
