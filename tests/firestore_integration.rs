// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Run with FIRESTORE_EMULATOR_HOST pointing at it; otherwise they are skipped.
//!
//! The emulator is shared between tests, so every test works on its own
//! uniquely named documents.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use camp_booking::error::AppError;
use camp_booking::middleware::auth::AuthUser;
use camp_booking::models::booking::NewBookingRequest;
use camp_booking::models::camp::{CampPatch, NewCamp, Pricing};
use camp_booking::models::event::{EventPatch, NewEvent};
use camp_booking::models::{ArchivalPolicy, BookingStatus, Role};
use camp_booking::services::BookingService;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app_with_db, create_test_jwt, test_db, unique_id};

fn new_camp(title: &str, pricing: serde_json::Value) -> NewCamp {
    serde_json::from_value(json!({
        "title": title,
        "description": "Неделя на озере",
        "startDate": "2099-07-01T09:00:00Z",
        "endDate": "2099-07-08T18:00:00Z",
        "location": "Карелия",
        "type": "летний",
        "organizer": "org-1",
        "campUrl": "https://camps.example.com/summer",
        "pricing": pricing,
        "directBooking": true
    }))
    .unwrap()
}

fn new_event(title: &str) -> NewEvent {
    serde_json::from_value(json!({
        "title": title,
        "description": "О походах",
        "date": "2099-11-01T18:00:00Z",
        "location": "Библиотека",
        "category": "семинар",
        "organizer": "Аня"
    }))
    .unwrap()
}

fn actor(uid: &str, role: Role) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
        email: format!("{uid}@example.com"),
        role: Some(role),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER PROFILE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_ensure_user_profile_creates_once() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("user");
    let email = format!("{uid}@example.com");

    assert!(db.get_user_profile(&uid).await.unwrap().is_none());

    let first = db
        .ensure_user_profile(&uid, &email, Some("Анна".to_string()), None)
        .await
        .unwrap();
    assert_eq!(first.role, Role::User);
    assert_eq!(first.display_name.as_deref(), Some("Анна"));

    let second = db
        .ensure_user_profile(&uid, &email, Some("Другое имя".to_string()), None)
        .await
        .unwrap();
    assert_eq!(second.display_name.as_deref(), Some("Анна"));
    assert_eq!(second.created_at, first.created_at);
}

#[tokio::test]
async fn test_ensure_user_profile_keeps_promoted_role() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("user");
    let email = format!("{uid}@example.com");

    db.ensure_user_profile(&uid, &email, None, None).await.unwrap();
    let promoted = db.update_user_role(&uid, Role::Moderator).await.unwrap();
    assert_eq!(promoted.map(|p| p.role), Some(Role::Moderator));

    let again = db.ensure_user_profile(&uid, &email, None, None).await.unwrap();
    assert_eq!(again.role, Role::Moderator);
    assert!(again.permissions.can_manage_camps);
    assert!(!again.permissions.can_delete_camps);
}

#[tokio::test]
async fn test_set_role_by_email() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("user");
    let email = format!("{uid}@example.com");
    db.ensure_user_profile(&uid, &email, None, None).await.unwrap();

    let updated = db.set_user_role_by_email(&email, Role::Admin).await.unwrap();
    assert_eq!(updated.uid, uid);
    assert_eq!(updated.role, Role::Admin);

    let missing = db
        .set_user_role_by_email(&format!("{}@example.com", unique_id("nobody")), Role::Admin)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

async fn status_of(app: axum::Router, uri: &str, token: &str) -> StatusCode {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
    .status()
}

#[tokio::test]
async fn test_role_change_applies_to_existing_session() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("admin");
    db.ensure_user_profile(&uid, &format!("{uid}@example.com"), None, None)
        .await
        .unwrap();
    db.update_user_role(&uid, Role::Admin).await.unwrap();

    let (app, _) = create_test_app_with_db(db.clone());
    let token = create_test_jwt(&uid);
    assert_eq!(status_of(app.clone(), "/api/admin/users", &token).await, StatusCode::OK);

    db.update_user_role(&uid, Role::User).await.unwrap();
    assert_eq!(
        status_of(app, "/api/admin/users", &token).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_update_role_of_missing_user() {
    require_emulator!();

    let db = test_db().await;
    let result = db
        .update_user_role(&unique_id("ghost"), Role::Admin)
        .await
        .unwrap();
    assert!(result.is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// CAMP TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_camp_pricing_modes_are_exclusive() {
    require_emulator!();

    let db = test_db().await;
    let camp = db
        .create_camp(new_camp(
            &unique_id("camp"),
            json!({ "mode": "fixed", "value": 25000.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(camp.pricing, Pricing::Fixed(25000.0));

    let with_variants = db
        .update_camp(
            &camp.id,
            CampPatch {
                pricing: Some(
                    serde_json::from_value(json!({
                        "mode": "variants",
                        "value": [
                            { "name": "Палатка", "description": "Своё снаряжение", "price": 18000.0 },
                            { "name": "Домик", "description": "Проживание в доме" }
                        ]
                    }))
                    .unwrap(),
                ),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    match &with_variants.pricing {
        Pricing::Variants(variants) => assert_eq!(variants.len(), 2),
        other => panic!("expected variants, got {other:?}"),
    }

    let back_to_fixed = db
        .update_camp(
            &camp.id,
            CampPatch {
                pricing: Some(Pricing::Fixed(30000.0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(back_to_fixed.pricing, Pricing::Fixed(30000.0));

    let stored = db.get_camp(&camp.id).await.unwrap().unwrap();
    assert_eq!(stored.pricing, Pricing::Fixed(30000.0));

    db.delete_camp(&camp.id).await.unwrap();
    assert!(db.get_camp(&camp.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_camp_patch_leaves_other_fields() {
    require_emulator!();

    let db = test_db().await;
    let title = unique_id("camp");
    let camp = db
        .create_camp(new_camp(&title, json!({ "mode": "onRequest" })))
        .await
        .unwrap();

    let updated = db
        .update_camp(
            &camp.id,
            CampPatch {
                location: Some("Алтай".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.location, "Алтай");
    assert_eq!(updated.title, title);
    assert_eq!(updated.pricing, Pricing::OnRequest);
    assert!(updated.updated_at >= camp.updated_at);
}

#[tokio::test]
async fn test_update_of_deleted_camp_is_not_found() {
    require_emulator!();

    let db = test_db().await;
    let camp = db
        .create_camp(new_camp(&unique_id("camp"), json!({ "mode": "onRequest" })))
        .await
        .unwrap();
    db.delete_camp(&camp.id).await.unwrap();

    let result = db
        .update_camp(
            &camp.id,
            CampPatch {
                location: Some("Алтай".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    // No partial document was written in its place
    assert!(db.get_camp(&camp.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_camp_patch_null_clears_image() {
    require_emulator!();

    let db = test_db().await;
    let mut new = new_camp(&unique_id("camp"), json!({ "mode": "onRequest" }));
    new.image = Some("https://camps.example.com/lake.jpg".to_string());
    new.age_group = Some("10-14".to_string());
    let camp = db.create_camp(new).await.unwrap();
    assert!(camp.image.is_some());

    let patch: CampPatch = serde_json::from_value(json!({ "image": null })).unwrap();
    let updated = db.update_camp(&camp.id, patch).await.unwrap();
    assert_eq!(updated.image, None);
    assert_eq!(updated.age_group.as_deref(), Some("10-14"));
}

// ═══════════════════════════════════════════════════════════════════════════
// BOOKING TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_duplicate_booking_is_conflict() {
    require_emulator!();

    let db = test_db().await;
    let service = BookingService::new(db.clone(), ArchivalPolicy::default());
    let camp = db
        .create_camp(new_camp(&unique_id("camp"), json!({ "mode": "onRequest" })))
        .await
        .unwrap();
    let user = actor(&unique_id("user"), Role::User);
    let contact = format!("@{}", unique_id("tg"));

    let booking = service
        .submit(
            &user,
            &camp.id,
            NewBookingRequest {
                name: "Анна".to_string(),
                contact: contact.clone(),
                message: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.camp_title, camp.title);
    assert!(service.has_existing_request(&camp.id, &contact).await);

    let duplicate = service
        .submit(
            &user,
            &camp.id,
            NewBookingRequest {
                name: "Анна снова".to_string(),
                contact: format!("  {contact} "),
                message: Some("Ещё раз".to_string()),
            },
        )
        .await;
    match duplicate {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, AppError::ALREADY_RESPONDED),
        other => panic!("expected conflict, got {other:?}"),
    }

    let for_camp = db.list_booking_requests_for_camp(&camp.id).await.unwrap();
    assert_eq!(for_camp.len(), 1);
}

#[tokio::test]
async fn test_booking_lookup_only_sees_own_requests() {
    require_emulator!();

    let db = test_db().await;
    let service = BookingService::new(db.clone(), ArchivalPolicy::default());
    let camp = db
        .create_camp(new_camp(&unique_id("camp"), json!({ "mode": "onRequest" })))
        .await
        .unwrap();
    let owner = actor(&unique_id("user"), Role::User);
    let contact = format!("@{}", unique_id("tg"));

    service
        .submit(
            &owner,
            &camp.id,
            NewBookingRequest {
                name: "Анна".to_string(),
                contact: contact.clone(),
                message: None,
            },
        )
        .await
        .unwrap();

    let stranger = actor(&unique_id("user"), Role::User);
    let moderator = actor(&unique_id("mod"), Role::Moderator);
    assert!(service.has_request_visible_to(&owner, &camp.id, &contact).await);
    assert!(!service.has_request_visible_to(&stranger, &camp.id, &contact).await);
    assert!(service.has_request_visible_to(&moderator, &camp.id, &contact).await);
}

#[tokio::test]
async fn test_booking_missing_camp_is_not_found() {
    require_emulator!();

    let db = test_db().await;
    let service = BookingService::new(db, ArchivalPolicy::default());

    let result = service
        .submit(
            &actor("u", Role::User),
            &unique_id("no-camp"),
            NewBookingRequest {
                name: "Анна".to_string(),
                contact: "@anna".to_string(),
                message: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_booking_status_transitions_persist() {
    require_emulator!();

    let db = test_db().await;
    let service = BookingService::new(db.clone(), ArchivalPolicy::default());
    let camp = db
        .create_camp(new_camp(&unique_id("camp"), json!({ "mode": "onRequest" })))
        .await
        .unwrap();
    let booking = service
        .submit(
            &actor(&unique_id("user"), Role::User),
            &camp.id,
            NewBookingRequest {
                name: "Иван".to_string(),
                contact: unique_id("ivan"),
                message: None,
            },
        )
        .await
        .unwrap();

    let approved = service
        .transition(&booking.id, BookingStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let rejected = service.transition(&booking.id, BookingStatus::Rejected).await;
    assert!(matches!(rejected, Err(AppError::Conflict(_))));

    let stored = db.get_booking_request(&booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);

    let reopened = service
        .transition(&booking.id, BookingStatus::Pending)
        .await
        .unwrap();
    assert_eq!(reopened.status, BookingStatus::Pending);
}

// ═══════════════════════════════════════════════════════════════════════════
// EVENT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_events_are_scoped_to_owner() {
    require_emulator!();

    let db = test_db().await;
    let owner = unique_id("owner");
    let stranger = unique_id("stranger");

    let event = db.create_event(&owner, new_event("Семинар")).await.unwrap();
    assert_eq!(event.user_id, owner);

    assert!(db.get_event(&owner, &event.id).await.unwrap().is_some());
    assert!(db.get_event(&stranger, &event.id).await.unwrap().is_none());

    let mine = db.list_events(&owner).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(db.list_events(&stranger).await.unwrap().is_empty());

    let updated = db
        .update_event(
            &event.id,
            EventPatch {
                attendees: Some(12),
                max_attendees: Some(Some(40)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.attendees, 12);
    assert_eq!(updated.max_attendees, Some(40));
    assert_eq!(updated.title, "Семинар");

    db.delete_event(&event.id).await.unwrap();
    assert!(db.get_event(&owner, &event.id).await.unwrap().is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// CAMP TYPE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_seed_camp_types_only_fills_empty_collection() {
    require_emulator!();

    let db = test_db().await;

    // The first call may find types left by an earlier run
    db.seed_camp_types(camp_booking::models::camp_type::default_camp_types())
        .await
        .unwrap();
    let second = db
        .seed_camp_types(camp_booking::models::camp_type::default_camp_types())
        .await
        .unwrap();
    assert!(second.is_empty());

    let types = db.list_camp_types().await.unwrap();
    assert!(!types.is_empty());
    assert!(types
        .iter()
        .all(|t| t.color.len() == 7 && t.color.starts_with('#')));
}
