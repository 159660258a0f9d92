// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp type (category) model.

use crate::models::camp::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

fn default_true() -> bool {
    true
}

/// Stored camp type (`campTypes/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampTypeDocument {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Soft-delete flag; documents written before it existed are active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl CampTypeDocument {
    pub fn new(camp_type: NewCampType, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: camp_type.name.trim().to_string(),
            description: camp_type.description.trim().to_string(),
            color: camp_type.color.to_lowercase(),
            icon: camp_type.icon.filter(|s| !s.trim().is_empty()),
            is_active: camp_type.is_active,
            created_at: now,
            updated_at: now,
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
pub struct CampType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampTypeDocument> for CampType {
    fn from(doc: CampTypeDocument) -> Self {
        Self {
            id: doc.id.unwrap_or_default(),
            name: doc.name,
            description: doc.description,
            color: doc.color,
            icon: doc.icon,
            is_active: doc.is_active,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl CampType {
    /// Whether a camp's `type` field refers to this camp type.
    ///
    /// Camps store either the type's document id or its name.
    pub fn is_referenced_by(&self, camp_type: &str) -> bool {
        self.id == camp_type || self.name == camp_type
    }

    pub fn badge(&self) -> CampTypeBadge {
        CampTypeBadge {
            name: self.name.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Display data attached to each camp in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CampTypeBadge {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
}

/// Resolve the badge for a camp's `type` field from the known camp types.
pub fn resolve_badge(camp_types: &[CampType], camp_type: &str) -> Option<CampTypeBadge> {
    camp_types
        .iter()
        .find(|t| t.is_referenced_by(camp_type))
        .map(CampType::badge)
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let digits = color.strip_prefix('#').unwrap_or("");
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message(Cow::Borrowed(
            "Цвет должен быть в формате #rrggbb",
        )))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCampType {
    #[validate(custom(function = "not_blank", message = "Название обязательно"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Описание обязательно"))]
    pub description: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CampTypePatch {
    #[validate(custom(function = "not_blank", message = "Название обязательно"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Описание обязательно"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub icon: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl CampTypePatch {
    pub fn field_mask(&self) -> Vec<&'static str> {
        let mut mask = vec!["updatedAt"];
        let set = [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("color", self.color.is_some()),
            ("icon", self.icon.is_some()),
            ("isActive", self.is_active.is_some()),
        ];
        mask.extend(set.iter().filter(|(_, present)| *present).map(|(f, _)| *f));
        mask
    }

    pub fn into_document(self, now: DateTime<Utc>) -> CampTypePatchDocument {
        CampTypePatchDocument {
            name: self.name.map(|s| s.trim().to_string()),
            description: self.description.map(|s| s.trim().to_string()),
            color: self.color.map(|c| c.to_lowercase()),
            icon: self.icon.flatten(),
            is_active: self.is_active,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampTypePatchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Camp types inserted by the seeding operation.
pub const DEFAULT_CAMP_TYPES: [(&str, &str, &str); 8] = [
    ("летний", "Летние кэмпы на природе", "#f59e0b"),
    ("зимний", "Зимние кэмпы и активности", "#0ea5e9"),
    ("языковой", "Изучение иностранных языков", "#8b5cf6"),
    ("спортивный", "Спортивные тренировки и соревнования", "#10b981"),
    ("творческий", "Искусство, музыка и творчество", "#f43f5e"),
    ("технический", "Программирование и технологии", "#6366f1"),
    ("приключенческий", "Походы и приключения", "#f97316"),
    ("образовательный", "Образовательные программы", "#4f46e5"),
];

pub fn default_camp_types() -> Vec<NewCampType> {
    DEFAULT_CAMP_TYPES
        .iter()
        .map(|(name, description, color)| NewCampType {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            icon: None,
            is_active: true,
        })
        .collect()
}
