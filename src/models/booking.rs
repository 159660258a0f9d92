// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking requests and their status lifecycle.

use crate::models::camp::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Allowed moves: a pending request is decided, and a decision can be
    /// reopened. There is no direct approved <-> rejected move.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Pending) | (Rejected, Pending)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored booking request (`bookingRequests/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestDocument {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub camp_id: String,
    /// Camp title at submission time
    #[serde(default)]
    pub camp_title: String,
    pub name: String,
    /// Phone, e-mail or messenger handle, as typed
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    /// Submitting account, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: String,
    pub camp_id: String,
    pub camp_title: String,
    pub name: String,
    pub contact: String,
    pub message: Option<String>,
    pub status: BookingStatus,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRequestDocument> for BookingRequest {
    fn from(doc: BookingRequestDocument) -> Self {
        Self {
            id: doc.id.unwrap_or_default(),
            camp_id: doc.camp_id,
            camp_title: doc.camp_title,
            name: doc.name,
            contact: doc.contact,
            message: doc.message,
            status: doc.status,
            user_id: doc.user_id,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Booking form body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequest {
    #[validate(custom(function = "not_blank", message = "Имя обязательно"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Контакт обязателен"))]
    pub contact: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Сообщение слишком длинное"))]
    pub message: Option<String>,
}

impl BookingRequestDocument {
    /// A new pending request; a blank message becomes the default one.
    pub fn pending(
        camp_id: &str,
        camp_title: &str,
        request: NewBookingRequest,
        user_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let message = request
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_message(camp_title));
        Self {
            id: None,
            camp_id: camp_id.to_string(),
            camp_title: camp_title.to_string(),
            name: request.name.trim().to_string(),
            contact: request.contact.trim().to_string(),
            message: Some(message),
            status: BookingStatus::Pending,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn default_message(camp_title: &str) -> String {
    format!("Заявка на бронирование кэмпа \"{camp_title}\"")
}

/// Status change request body.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// Serialized body of a status transition write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusPatch {
    pub status: BookingStatus,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl BookingStatusPatch {
    pub const FIELD_MASK: [&'static str; 2] = ["status", "updatedAt"];
}
