// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod booking;
pub mod catalog;
pub mod identity;

pub use booking::BookingService;
pub use catalog::{CampSummary, CatalogService};
pub use identity::{FirebaseTokenVerifier, IdentityError, VerifiedIdentity};
