// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Events owned by individual users.

use crate::models::camp::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum EventCategory {
    #[serde(rename = "конференция")]
    Conference,
    #[serde(rename = "семинар")]
    Seminar,
    #[serde(rename = "воркшоп")]
    Workshop,
    #[serde(rename = "встреча")]
    Meetup,
    #[serde(rename = "презентация")]
    Presentation,
    #[serde(rename = "вебинар")]
    Webinar,
    #[serde(rename = "другое")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum EventStatus {
    #[default]
    #[serde(rename = "предстоящее")]
    Upcoming,
    #[serde(rename = "проходит")]
    Ongoing,
    #[serde(rename = "завершено")]
    Finished,
    #[serde(rename = "отменено")]
    Cancelled,
}

/// Stored event (`events/{id}`), always scoped by `userId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    pub category: EventCategory,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub organizer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl EventDocument {
    pub fn new(owner: &str, event: NewEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: owner.to_string(),
            title: event.title.trim().to_string(),
            description: event.description.trim().to_string(),
            date: event.date,
            location: event.location.trim().to_string(),
            category: event.category,
            attendees: event.attendees,
            max_attendees: event.max_attendees,
            status: event.status,
            organizer: event.organizer.trim().to_string(),
            image: event.image.filter(|s| !s.trim().is_empty()),
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
pub struct Event {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub category: EventCategory,
    pub attendees: u32,
    pub max_attendees: Option<u32>,
    pub status: EventStatus,
    pub organizer: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id.unwrap_or_default(),
            user_id: doc.user_id,
            title: doc.title,
            description: doc.description,
            date: doc.date,
            location: doc.location,
            category: doc.category,
            attendees: doc.attendees,
            max_attendees: doc.max_attendees,
            status: doc.status,
            organizer: doc.organizer,
            image: doc.image,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

fn validate_capacity(attendees: u32, max_attendees: Option<u32>) -> Result<(), ValidationError> {
    match max_attendees {
        Some(max) if max > 0 && max < attendees => Err(ValidationError::new("max_attendees")
            .with_message(Cow::Borrowed(
                "Максимальное количество не может быть меньше текущего",
            ))),
        _ => Ok(()),
    }
}

fn validate_new_event_capacity(event: &NewEvent) -> Result<(), ValidationError> {
    validate_capacity(event.attendees, event.max_attendees)
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_new_event_capacity"))]
pub struct NewEvent {
    #[validate(custom(function = "not_blank", message = "Название мероприятия обязательно"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Описание мероприятия обязательно"))]
    pub description: String,
    pub date: DateTime<Utc>,
    #[validate(custom(function = "not_blank", message = "Место проведения обязательно"))]
    pub location: String,
    pub category: EventCategory,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub status: EventStatus,
    #[validate(custom(function = "not_blank", message = "Имя организатора обязательно"))]
    pub organizer: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[validate(custom(function = "not_blank", message = "Название мероприятия обязательно"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Описание мероприятия обязательно"))]
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(custom(function = "not_blank", message = "Место проведения обязательно"))]
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub attendees: Option<u32>,
    /// `null` removes the limit
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub max_attendees: Option<Option<u32>>,
    pub status: Option<EventStatus>,
    #[validate(custom(function = "not_blank", message = "Имя организатора обязательно"))]
    pub organizer: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub image: Option<Option<String>>,
}

impl EventPatch {
    /// Check capacity of the event as it would look after this patch.
    pub fn check_capacity_against(&self, current: &Event) -> Result<(), ValidationError> {
        validate_capacity(
            self.attendees.unwrap_or(current.attendees),
            match self.max_attendees {
                Some(max) => max,
                None => current.max_attendees,
            },
        )
    }

    pub fn field_mask(&self) -> Vec<&'static str> {
        let mut mask = vec!["updatedAt"];
        let set = [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("date", self.date.is_some()),
            ("location", self.location.is_some()),
            ("category", self.category.is_some()),
            ("attendees", self.attendees.is_some()),
            ("maxAttendees", self.max_attendees.is_some()),
            ("status", self.status.is_some()),
            ("organizer", self.organizer.is_some()),
            ("image", self.image.is_some()),
        ];
        mask.extend(set.iter().filter(|(_, present)| *present).map(|(f, _)| *f));
        mask
    }

    pub fn into_document(self, now: DateTime<Utc>) -> EventPatchDocument {
        EventPatchDocument {
            title: self.title.map(|s| s.trim().to_string()),
            description: self.description.map(|s| s.trim().to_string()),
            date: self.date,
            location: self.location.map(|s| s.trim().to_string()),
            category: self.category,
            attendees: self.attendees,
            max_attendees: self.max_attendees.flatten(),
            status: self.status,
            organizer: self.organizer.map(|s| s.trim().to_string()),
            image: self.image.flatten(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}
