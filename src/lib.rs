// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp booking API
//!
//! Backend for a camp and event booking application: camps, camp types,
//! organizers, booking requests and per-user events, gated by a three-tier
//! role system.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{BookingService, CatalogService, FirebaseTokenVerifier};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity_verifier: Arc<FirebaseTokenVerifier>,
    pub catalog: CatalogService,
    pub bookings: BookingService,
}

impl AppState {
    pub fn new(config: Config, db: FirestoreDb, identity_verifier: Arc<FirebaseTokenVerifier>) -> Self {
        let policy = config.archival_policy;
        Self {
            catalog: CatalogService::new(db.clone(), policy),
            bookings: BookingService::new(db.clone(), policy),
            config,
            db,
            identity_verifier,
        }
    }
}
