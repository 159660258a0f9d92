// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp catalogue: archival, filtering and type badges.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::camp::CampFilter;
use crate::models::camp_type::resolve_badge;
use crate::models::{ArchivalPolicy, Camp, CampType, CampTypeBadge, Permission};
use crate::time_utils::utc_today;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A camp as listed in the catalogue.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CampSummary {
    #[serde(flatten)]
    pub camp: Camp,
    pub type_badge: Option<CampTypeBadge>,
    pub is_archived: bool,
}

#[derive(Clone)]
pub struct CatalogService {
    db: FirestoreDb,
    policy: ArchivalPolicy,
}

impl CatalogService {
    pub fn new(db: FirestoreDb, policy: ArchivalPolicy) -> Self {
        Self { db, policy }
    }

    /// Camps matching `filter`, newest first.
    ///
    /// Archived camps are only included when asked for by a viewer who may
    /// open the admin panel.
    pub async fn list_camps(&self, viewer: &AuthUser, filter: &CampFilter) -> Result<Vec<CampSummary>> {
        let months = filter.months().map_err(AppError::BadRequest)?;
        let include_archived =
            filter.include_archived && viewer.can(Permission::ViewAdminPanel);

        let camps = match filter.single_type() {
            Some(camp_type) => self.db.list_camps_by_type(camp_type).await?,
            None => self.db.list_camps().await?,
        };
        let camp_types = self.db.list_camp_types().await?;

        let listing = build_listing(
            camps,
            &camp_types,
            filter,
            &months,
            self.policy,
            utc_today(Utc::now()),
            include_archived,
        );

        tracing::debug!(
            count = listing.len(),
            include_archived,
            "Listed camps"
        );
        Ok(listing)
    }

    /// One camp with its badge, archived or not.
    pub async fn get_camp(&self, id: &str) -> Result<CampSummary> {
        let camp = self
            .db
            .get_camp(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Camp {id} not found")))?;
        let camp_types = self.db.list_camp_types().await?;
        Ok(summarize(camp, &camp_types, self.policy, utc_today(Utc::now())))
    }

    /// Fail with 400 unless `camp_type` names or identifies a known camp type.
    pub async fn ensure_camp_type_exists(&self, camp_type: &str) -> Result<()> {
        let camp_types = self.db.list_camp_types().await?;
        if camp_types.iter().any(|t| t.is_referenced_by(camp_type.trim())) {
            Ok(())
        } else {
            Err(AppError::BadRequest(
                "Выбранный тип кэмпа не существует".to_string(),
            ))
        }
    }
}

fn summarize(
    camp: Camp,
    camp_types: &[CampType],
    policy: ArchivalPolicy,
    today: NaiveDate,
) -> CampSummary {
    CampSummary {
        type_badge: resolve_badge(camp_types, &camp.camp_type),
        is_archived: policy.is_archived(&camp, today),
        camp,
    }
}

/// Apply archival and filters to `camps`, keeping their order.
pub fn build_listing(
    camps: Vec<Camp>,
    camp_types: &[CampType],
    filter: &CampFilter,
    months: &[u32],
    policy: ArchivalPolicy,
    today: NaiveDate,
    include_archived: bool,
) -> Vec<CampSummary> {
    camps
        .into_iter()
        .filter(|camp| filter.matches(camp, months))
        .map(|camp| summarize(camp, camp_types, policy, today))
        .filter(|summary| include_archived || !summary.is_archived)
        .collect()
}
