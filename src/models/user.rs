// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use crate::models::role::{Permissions, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// User profile stored in Firestore.
///
/// Stored at `userProfiles/{uid}`; the identity id is the document key, so
/// repeated writes for one identity can never produce a second profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDocument {
    /// Identity-provider user id (also used as document ID)
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Role,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfileDocument {
    /// A fresh profile with the lowest-privilege role.
    pub fn new_default(
        uid: &str,
        email: &str,
        display_name: Option<String>,
        photo_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.to_string(),
            email: email.to_string(),
            display_name: display_name.filter(|s| !s.trim().is_empty()),
            photo_url: photo_url.filter(|s| !s.trim().is_empty()),
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }
}

/// User profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Role,
    pub permissions: Permissions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfileDocument> for UserProfile {
    fn from(doc: UserProfileDocument) -> Self {
        Self {
            permissions: doc.role.permissions(),
            uid: doc.uid,
            email: doc.email,
            display_name: doc.display_name,
            photo_url: doc.photo_url,
            role: doc.role,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Self-service profile edits.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfile {
    #[validate(length(max = 100, message = "Имя слишком длинное"))]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    #[validate(url(message = "Некорректная ссылка на фото"))]
    pub photo_url: Option<String>,
}

/// Partial profile write; only set fields land in the field mask.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfilePatch {
    pub fn role(role: Role, now: DateTime<Utc>) -> Self {
        Self {
            display_name: None,
            photo_url: None,
            role: Some(role),
            updated_at: now,
        }
    }

    pub fn profile(update: UpdateUserProfile, now: DateTime<Utc>) -> Self {
        Self {
            display_name: update.display_name,
            photo_url: update.photo_url,
            role: None,
            updated_at: now,
        }
    }

    pub fn field_mask(&self) -> Vec<&'static str> {
        let mut mask = vec!["updatedAt"];
        if self.display_name.is_some() {
            mask.push("displayName");
        }
        if self.photo_url.is_some() {
            mask.push("photoURL");
        }
        if self.role.is_some() {
            mask.push("role");
        }
        mask
    }
}
