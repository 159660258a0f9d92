// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp organizer model.

use crate::models::camp::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

fn default_true() -> bool {
    true
}

/// Stored organizer (`organizers/{id}`).
///
/// Older documents carry no timestamps, so both are optional on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerDocument {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl OrganizerDocument {
    pub fn new(organizer: NewOrganizer, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: organizer.name.trim().to_string(),
            description: non_blank(organizer.description),
            contact_email: non_blank(organizer.contact_email),
            contact_phone: non_blank(organizer.contact_phone),
            website: non_blank(organizer.website),
            logo: non_blank(organizer.logo),
            color: non_blank(organizer.color),
            is_active: organizer.is_active,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OrganizerDocument> for Organizer {
    fn from(doc: OrganizerDocument) -> Self {
        Self {
            id: doc.id.unwrap_or_default(),
            name: doc.name,
            description: doc.description,
            contact_email: doc.contact_email,
            contact_phone: doc.contact_phone,
            website: doc.website,
            logo: doc.logo,
            color: doc.color,
            is_active: doc.is_active,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganizer {
    #[validate(custom(function = "not_blank", message = "Название организатора обязательно"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Некорректный email"))]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Некорректная ссылка на сайт"))]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerPatch {
    #[validate(custom(function = "not_blank", message = "Название организатора обязательно"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    #[validate(email(message = "Некорректный email"))]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    #[validate(url(message = "Некорректная ссылка на сайт"))]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub logo: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub color: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl OrganizerPatch {
    pub fn field_mask(&self) -> Vec<&'static str> {
        let mut mask = vec!["updatedAt"];
        let set = [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("contactEmail", self.contact_email.is_some()),
            ("contactPhone", self.contact_phone.is_some()),
            ("website", self.website.is_some()),
            ("logo", self.logo.is_some()),
            ("color", self.color.is_some()),
            ("isActive", self.is_active.is_some()),
        ];
        mask.extend(set.iter().filter(|(_, present)| *present).map(|(f, _)| *f));
        mask
    }

    pub fn into_document(self, now: DateTime<Utc>) -> OrganizerPatchDocument {
        OrganizerPatchDocument {
            name: self.name.map(|s| s.trim().to_string()),
            description: self.description.flatten(),
            contact_email: self.contact_email.flatten(),
            contact_phone: self.contact_phone.flatten(),
            website: self.website.flatten(),
            logo: self.logo.flatten(),
            color: self.color.flatten(),
            is_active: self.is_active,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerPatchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}
