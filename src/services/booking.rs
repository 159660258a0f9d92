// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking request workflow.
//!
//! Submission runs its checks in a fixed order:
//! 1. The camp exists
//! 2. The camp takes bookings directly
//! 3. The camp is not archived (staff may still book archived camps)
//! 4. No request for the same camp and contact exists yet
//!
//! Uniqueness is best-effort: two concurrent submissions can both pass
//! step 4.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::booking::{BookingRequestDocument, NewBookingRequest};
use crate::models::{ArchivalPolicy, BookingRequest, BookingStatus, Camp, Permission};
use crate::time_utils::utc_today;
use chrono::{NaiveDate, Utc};

/// Submits booking requests and moves them through their lifecycle.
#[derive(Clone)]
pub struct BookingService {
    db: FirestoreDb,
    policy: ArchivalPolicy,
}

impl BookingService {
    pub fn new(db: FirestoreDb, policy: ArchivalPolicy) -> Self {
        Self { db, policy }
    }

    /// Whether a request for `camp_id` from `contact` already exists.
    ///
    /// A failed lookup is logged and reported as "no existing booking".
    pub async fn has_existing_request(&self, camp_id: &str, contact: &str) -> bool {
        self.lookup(camp_id, contact, None).await
    }

    /// Existence check on behalf of `viewer`.
    ///
    /// Camp managers see every request; anyone else only their own, so the
    /// answer never reveals whether some other person has booked.
    pub async fn has_request_visible_to(
        &self,
        viewer: &AuthUser,
        camp_id: &str,
        contact: &str,
    ) -> bool {
        let owner = (!viewer.can(Permission::ManageCamps)).then_some(viewer.uid.as_str());
        self.lookup(camp_id, contact, owner).await
    }

    async fn lookup(&self, camp_id: &str, contact: &str, owner: Option<&str>) -> bool {
        match self
            .db
            .booking_request_exists(camp_id, contact.trim(), owner)
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(
                    camp_id,
                    error = %e,
                    "Existing booking lookup failed, allowing submission"
                );
                false
            }
        }
    }

    /// Submit a new pending request for a camp.
    pub async fn submit(
        &self,
        actor: &AuthUser,
        camp_id: &str,
        request: NewBookingRequest,
    ) -> Result<BookingRequest> {
        let camp = self
            .db
            .get_camp(camp_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Camp {camp_id} not found")))?;

        check_eligibility(
            &camp,
            self.policy,
            utc_today(Utc::now()),
            actor.can(Permission::ManageCamps),
        )?;

        if self.has_existing_request(camp_id, &request.contact).await {
            tracing::info!(camp_id, uid = %actor.uid, "Duplicate booking request rejected");
            return Err(AppError::Conflict(AppError::ALREADY_RESPONDED.to_string()));
        }

        let doc = BookingRequestDocument::pending(
            camp_id,
            &camp.title,
            request,
            Some(actor.uid.clone()),
            Utc::now(),
        );
        self.db.create_booking_request(&doc).await
    }

    /// Move a request to `next`. Invalid moves are rejected without a write.
    pub async fn transition(&self, booking_id: &str, next: BookingStatus) -> Result<BookingRequest> {
        let current = self
            .db
            .get_booking_request(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking request {booking_id} not found")))?;

        check_transition(current.status, next)?;

        let updated = self.db.set_booking_status(booking_id, next).await?;
        tracing::info!(
            booking_id,
            from = %current.status,
            to = %next,
            "Booking status changed"
        );
        Ok(updated)
    }
}

/// Pre-conditions on the camp itself, checked before the duplicate lookup.
pub fn check_eligibility(
    camp: &Camp,
    policy: ArchivalPolicy,
    today: NaiveDate,
    actor_manages_camps: bool,
) -> Result<()> {
    if !camp.direct_booking {
        return Err(AppError::BadRequest(
            "Этот кэмп не принимает заявки напрямую, используйте ссылку на кэмп".to_string(),
        ));
    }

    if policy.is_archived(camp, today) && !actor_manages_camps {
        return Err(AppError::BadRequest(
            "Кэмп находится в архиве, заявки не принимаются".to_string(),
        ));
    }

    Ok(())
}

pub fn check_transition(current: BookingStatus, next: BookingStatus) -> Result<()> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Cannot change booking status from {current} to {next}"
        )))
    }
}
