// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod booking;
pub mod camp;
pub mod camp_type;
pub mod event;
pub mod organizer;
pub mod role;
pub mod user;

pub use booking::{BookingRequest, BookingStatus};
pub use camp::{ArchivalPolicy, Camp, CampStatus, Pricing};
pub use camp_type::{CampType, CampTypeBadge};
pub use event::Event;
pub use organizer::Organizer;
pub use role::{Permission, Permissions, Role};
pub use user::UserProfile;

use serde::{Deserialize, Deserializer};

/// Deserialize a patch field that can be cleared.
///
/// Paired with `#[serde(default)]`: an absent field stays `None` (keep),
/// `null` becomes `Some(None)` (clear) and a value becomes `Some(Some(v))`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
