// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session JWT authentication middleware.
//!
//! The session token proves identity only. The role is read from the stored
//! user profile on every request, so role changes apply immediately.

use crate::error::AppError;
use crate::models::role::has_permission;
use crate::models::{Permission, Permissions, Role};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the HttpOnly session cookie.
pub const SESSION_COOKIE: &str = "camp_session";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity-provider uid)
    pub sub: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user: identity from the session JWT, role from the profile.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    /// `None` when no profile is stored; such a user holds no permissions.
    pub role: Option<Role>,
}

impl AuthUser {
    pub fn permissions(&self) -> Permissions {
        self.role.map_or(Permissions::NONE, Role::permissions)
    }

    pub fn can(&self, permission: Permission) -> bool {
        has_permission(self.role, permission)
    }

    /// Fail with 403 unless the user's role grants `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.can(permission) {
            Ok(())
        } else {
            tracing::debug!(uid = %self.uid, role = ?self.role, ?permission, "Permission denied");
            Err(AppError::Forbidden)
        }
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => return Err(AppError::Unauthorized),
        }
    };

    let claims = decode_jwt(&token, &state.config.jwt_signing_key)?;
    let role = state
        .db
        .get_user_profile(&claims.sub)
        .await?
        .map(|profile| profile.role);

    let auth_user = AuthUser {
        uid: claims.sub,
        email: claims.email,
        role,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Validate a session JWT and return its claims.
pub fn decode_jwt(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::InvalidToken
    })?;

    if token_data.claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(token_data.claims)
}

/// Create a JWT for a user session.
pub fn create_jwt(
    uid: &str,
    email: &str,
    signing_key: &[u8],
    ttl_hours: u64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: uid.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + (ttl_hours as usize) * 60 * 60,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
