// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp model: stored document, API shape, pricing and the archival rule.
//!
//! Pricing is a sum type in the domain. In Firestore it is still encoded as
//! the two optional fields `price` and `variants`; at most one of them is ever
//! written, and every pricing update names both in the field mask so the mode
//! not chosen is deleted.

use crate::time_utils::{month_index, utc_today};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

// ─── Enums ───────────────────────────────────────────────────

/// Explicit camp status set by staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum CampStatus {
    #[default]
    Active,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Difficulty {
    #[serde(rename = "начинающий")]
    Beginner,
    #[serde(rename = "средний")]
    Intermediate,
    #[serde(rename = "продвинутый")]
    Advanced,
    #[serde(rename = "экспертный")]
    Expert,
}

/// Which rule decides whether a camp is archived.
///
/// One policy is configured per deployment and used for listing, filtering
/// and booking eligibility alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchivalPolicy {
    /// Active iff the start date (UTC calendar day) is today or later.
    #[default]
    ByStartDate,
    /// Active iff the stored status is `active`.
    ByStatus,
}

impl ArchivalPolicy {
    pub fn is_archived(self, camp: &Camp, today: NaiveDate) -> bool {
        match self {
            ArchivalPolicy::ByStartDate => utc_today(camp.start_date) < today,
            ArchivalPolicy::ByStatus => camp.status == CampStatus::Archived,
        }
    }
}

impl FromStr for ArchivalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start_date" => Ok(ArchivalPolicy::ByStartDate),
            "status" => Ok(ArchivalPolicy::ByStatus),
            other => Err(format!("unknown archival policy: {other}")),
        }
    }
}

// ─── Pricing ─────────────────────────────────────────────────

/// One participation option of a camp with variant pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CampVariant {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `None` means "price on request"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum Pricing {
    #[default]
    OnRequest,
    Fixed(f64),
    Variants(Vec<CampVariant>),
}

impl Pricing {
    /// Decode the stored two-field form. A non-empty variant list wins.
    pub fn from_fields(price: Option<f64>, variants: Option<Vec<CampVariant>>) -> Self {
        match (price, variants) {
            (_, Some(variants)) if !variants.is_empty() => Pricing::Variants(variants),
            (Some(price), _) => Pricing::Fixed(price),
            _ => Pricing::OnRequest,
        }
    }

    /// Encode into the stored two-field form; never both `Some`.
    pub fn into_fields(self) -> (Option<f64>, Option<Vec<CampVariant>>) {
        match self {
            Pricing::OnRequest => (None, None),
            Pricing::Fixed(price) => (Some(price), None),
            Pricing::Variants(variants) => (None, Some(variants)),
        }
    }

    /// Lowest and highest known price, if any.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        match self {
            Pricing::OnRequest => None,
            Pricing::Fixed(price) => Some((*price, *price)),
            Pricing::Variants(variants) => variants
                .iter()
                .filter_map(|v| v.price)
                .fold(None, |range, price| match range {
                    None => Some((price, price)),
                    Some((lo, hi)) => Some((f64::min(lo, price), f64::max(hi, price))),
                }),
        }
    }

    /// Give variants without an id a stable positional one.
    fn with_variant_ids(self) -> Self {
        match self {
            Pricing::Variants(variants) => Pricing::Variants(
                variants
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut v)| {
                        if v.id.trim().is_empty() {
                            v.id = format!("variant-{}", i + 1);
                        }
                        v
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

// ─── Stored Document ─────────────────────────────────────────

/// Camp document stored in Firestore (`camps/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampDocument {
    /// Document ID (populated on read, never written)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    /// Camp type name or camp type document id
    #[serde(rename = "type", default)]
    pub camp_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<CampVariant>>,
    /// Organizer document id
    #[serde(default)]
    pub organizer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub status: CampStatus,
    #[serde(default)]
    pub camp_url: String,
    #[serde(default)]
    pub direct_booking: bool,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl CampDocument {
    pub fn new(camp: NewCamp, now: DateTime<Utc>) -> Self {
        let (price, variants) = camp.pricing.with_variant_ids().into_fields();
        Self {
            id: None,
            title: camp.title.trim().to_string(),
            description: camp.description.trim().to_string(),
            start_date: camp.start_date,
            end_date: camp.end_date,
            location: camp.location.trim().to_string(),
            camp_type: camp.camp_type.trim().to_string(),
            price,
            variants,
            organizer: camp.organizer,
            image: camp.image.filter(|s| !s.trim().is_empty()),
            features: camp.features,
            difficulty: camp.difficulty,
            age_group: camp.age_group,
            included: camp.included,
            status: camp.status,
            camp_url: camp.camp_url.trim().to_string(),
            direct_booking: camp.direct_booking,
            created_at: now,
            updated_at: now,
        }
    }
}

// ─── API Shape ───────────────────────────────────────────────

/// Camp as seen by handlers and API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Camp {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    pub camp_type: String,
    pub pricing: Pricing,
    pub organizer: String,
    pub image: Option<String>,
    pub features: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub age_group: Option<String>,
    pub included: Vec<String>,
    pub status: CampStatus,
    pub camp_url: String,
    pub direct_booking: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampDocument> for Camp {
    fn from(doc: CampDocument) -> Self {
        Self {
            id: doc.id.unwrap_or_default(),
            title: doc.title,
            description: doc.description,
            start_date: doc.start_date,
            end_date: doc.end_date,
            location: doc.location,
            camp_type: doc.camp_type,
            pricing: Pricing::from_fields(doc.price, doc.variants),
            organizer: doc.organizer,
            image: doc.image,
            features: doc.features,
            difficulty: doc.difficulty,
            age_group: doc.age_group,
            included: doc.included,
            status: doc.status,
            camp_url: doc.camp_url,
            direct_booking: doc.direct_booking,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

// ─── Input Validation ────────────────────────────────────────

fn blank(message: &'static str) -> ValidationError {
    ValidationError::new("blank").with_message(Cow::Borrowed(message))
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_pricing(pricing: &Pricing) -> Result<(), ValidationError> {
    match pricing {
        Pricing::OnRequest => Ok(()),
        Pricing::Fixed(price) if !price.is_finite() || *price < 0.0 => Err(
            ValidationError::new("price")
                .with_message(Cow::Borrowed("Цена не может быть отрицательной")),
        ),
        Pricing::Fixed(_) => Ok(()),
        Pricing::Variants(variants) if variants.is_empty() => Err(ValidationError::new(
            "variants",
        )
        .with_message(Cow::Borrowed("Добавьте хотя бы один вариант участия"))),
        Pricing::Variants(variants) => {
            for variant in variants {
                if variant.name.trim().is_empty() {
                    return Err(blank("Название варианта обязательно"));
                }
                if variant.description.trim().is_empty() {
                    return Err(blank("Описание варианта обязательно"));
                }
                if variant.price.is_some_and(|p| !p.is_finite() || p <= 0.0) {
                    return Err(ValidationError::new("variant_price").with_message(
                        Cow::Borrowed("Цена варианта должна быть больше 0 или не указана"),
                    ));
                }
            }
            Ok(())
        }
    }
}

fn validate_date_order(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::new("date_order").with_message(Cow::Borrowed(
            "Дата окончания должна быть позже даты начала",
        )));
    }
    Ok(())
}

fn validate_new_camp_dates(camp: &NewCamp) -> Result<(), ValidationError> {
    validate_date_order(camp.start_date, camp.end_date)
}

/// Create-camp request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_new_camp_dates"))]
pub struct NewCamp {
    #[validate(custom(function = "not_blank", message = "Название кэмпа обязательно"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Описание кэмпа обязательно"))]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(custom(function = "not_blank", message = "Местоположение обязательно"))]
    pub location: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank", message = "Тип кэмпа обязателен"))]
    pub camp_type: String,
    #[serde(default)]
    #[validate(custom(function = "validate_pricing"))]
    pub pricing: Pricing,
    #[validate(custom(function = "not_blank", message = "Организатор обязателен"))]
    pub organizer: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub status: CampStatus,
    #[validate(url(
        message = "Ссылка на кэмп должна быть в правильном формате (например, https://example.com)"
    ))]
    pub camp_url: String,
    #[serde(default)]
    pub direct_booking: bool,
}

/// Update-camp request body. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CampPatch {
    #[validate(custom(function = "not_blank", message = "Название кэмпа обязательно"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Описание кэмпа обязательно"))]
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(custom(function = "not_blank", message = "Местоположение обязательно"))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank", message = "Тип кэмпа обязателен"))]
    pub camp_type: Option<String>,
    #[validate(custom(function = "validate_pricing"))]
    pub pricing: Option<Pricing>,
    #[validate(custom(function = "not_blank", message = "Организатор обязателен"))]
    pub organizer: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub image: Option<Option<String>>,
    pub features: Option<Vec<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub difficulty: Option<Option<Difficulty>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub age_group: Option<Option<String>>,
    pub included: Option<Vec<String>>,
    pub status: Option<CampStatus>,
    #[validate(url(
        message = "Ссылка на кэмп должна быть в правильном формате (например, https://example.com)"
    ))]
    pub camp_url: Option<String>,
    pub direct_booking: Option<bool>,
}

impl CampPatch {
    /// Check the date order of the camp as it would look after this patch.
    pub fn check_dates_against(&self, current: &Camp) -> Result<(), ValidationError> {
        if self.start_date.is_none() && self.end_date.is_none() {
            return Ok(());
        }
        validate_date_order(
            self.start_date.unwrap_or(current.start_date),
            self.end_date.unwrap_or(current.end_date),
        )
    }

    /// Firestore field paths written by this patch.
    ///
    /// Pricing always contributes both `price` and `variants`: the one absent
    /// from the patch document is deleted by the masked write.
    pub fn field_mask(&self) -> Vec<&'static str> {
        let mut mask = vec!["updatedAt"];
        let set = [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("startDate", self.start_date.is_some()),
            ("endDate", self.end_date.is_some()),
            ("location", self.location.is_some()),
            ("type", self.camp_type.is_some()),
            ("organizer", self.organizer.is_some()),
            ("image", self.image.is_some()),
            ("features", self.features.is_some()),
            ("difficulty", self.difficulty.is_some()),
            ("ageGroup", self.age_group.is_some()),
            ("included", self.included.is_some()),
            ("status", self.status.is_some()),
            ("campUrl", self.camp_url.is_some()),
            ("directBooking", self.direct_booking.is_some()),
        ];
        mask.extend(set.iter().filter(|(_, present)| *present).map(|(f, _)| *f));
        if self.pricing.is_some() {
            mask.push("price");
            mask.push("variants");
        }
        mask
    }

    pub fn into_document(self, now: DateTime<Utc>) -> CampPatchDocument {
        let (price, variants) = match self.pricing {
            Some(pricing) => pricing.with_variant_ids().into_fields(),
            None => (None, None),
        };
        CampPatchDocument {
            title: self.title.map(|s| s.trim().to_string()),
            description: self.description.map(|s| s.trim().to_string()),
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location.map(|s| s.trim().to_string()),
            camp_type: self.camp_type.map(|s| s.trim().to_string()),
            price,
            variants,
            organizer: self.organizer,
            image: self.image.flatten().filter(|s| !s.trim().is_empty()),
            features: self.features,
            difficulty: self.difficulty.flatten(),
            age_group: self.age_group.flatten(),
            included: self.included,
            status: self.status,
            camp_url: self.camp_url.map(|s| s.trim().to_string()),
            direct_booking: self.direct_booking,
            updated_at: now,
        }
    }
}

/// Serialized body of a masked camp update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampPatchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub camp_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<CampVariant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_booking: Option<bool>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub updated_at: DateTime<Utc>,
}

// ─── Catalogue Filter ────────────────────────────────────────

/// Query parameters of the camp catalogue.
///
/// List-valued parameters are comma separated (`months=5,6`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampFilter {
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Camps starting on or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Camps ending on or before this instant
    pub until: Option<DateTime<Utc>>,
    /// Zero-based months matched against start or end date
    pub months: Option<String>,
    /// Camp type names or ids
    pub types: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    /// Only honoured for callers allowed into the admin panel
    #[serde(default)]
    pub include_archived: bool,
}

fn split_list(raw: &Option<String>) -> Vec<&str> {
    raw.as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

impl CampFilter {
    pub fn months(&self) -> Result<Vec<u32>, String> {
        split_list(&self.months)
            .into_iter()
            .map(|m| match m.parse::<u32>() {
                Ok(month) if month < 12 => Ok(month),
                _ => Err(format!("Invalid month: {m}")),
            })
            .collect()
    }

    /// The requested camp type, if exactly one was given.
    pub fn single_type(&self) -> Option<&str> {
        match split_list(&self.types).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Whether `camp` passes every filter except the archival one.
    pub fn matches(&self, camp: &Camp, months: &[u32]) -> bool {
        if let Some(location) = self.location.as_deref().map(str::trim) {
            if !location.is_empty()
                && !camp
                    .location
                    .to_lowercase()
                    .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if self.from.is_some_and(|from| camp.start_date < from) {
            return false;
        }
        if self.until.is_some_and(|until| camp.end_date > until) {
            return false;
        }

        if !months.is_empty()
            && !months.contains(&month_index(camp.start_date))
            && !months.contains(&month_index(camp.end_date))
        {
            return false;
        }

        let types = split_list(&self.types);
        if !types.is_empty() && !types.contains(&camp.camp_type.as_str()) {
            return false;
        }

        if self.price_from.is_some() || self.price_to.is_some() {
            // Camps without any price never match a price filter.
            let Some((lowest, highest)) = camp.pricing.price_range() else {
                return false;
            };
            if self.price_from.is_some_and(|from| highest < from) {
                return false;
            }
            if self.price_to.is_some_and(|to| lowest > to) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn variant(name: &str, price: Option<f64>) -> CampVariant {
        CampVariant {
            id: String::new(),
            name: name.to_string(),
            description: format!("{name} description"),
            price,
        }
    }

    pub(crate) fn sample_camp(start: DateTime<Utc>) -> Camp {
        Camp {
            id: "camp-1".to_string(),
            title: "Летний лагерь".to_string(),
            description: "Неделя на озере".to_string(),
            start_date: start,
            end_date: start + Duration::days(7),
            location: "Карелия, Петрозаводск".to_string(),
            camp_type: "летний".to_string(),
            pricing: Pricing::Fixed(25_000.0),
            organizer: "org-1".to_string(),
            image: None,
            features: vec![],
            difficulty: Some(Difficulty::Beginner),
            age_group: Some("10-14".to_string()),
            included: vec![],
            status: CampStatus::Active,
            camp_url: "https://camps.example.com/summer".to_string(),
            direct_booking: true,
            created_at: start,
            updated_at: start,
        }
    }

    fn new_camp() -> NewCamp {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        NewCamp {
            title: "Летний лагерь".to_string(),
            description: "Неделя на озере".to_string(),
            start_date: start,
            end_date: start + Duration::days(7),
            location: "Карелия".to_string(),
            camp_type: "летний".to_string(),
            pricing: Pricing::Fixed(25_000.0),
            organizer: "org-1".to_string(),
            image: None,
            features: vec![],
            difficulty: None,
            age_group: None,
            included: vec![],
            status: CampStatus::Active,
            camp_url: "https://camps.example.com/summer".to_string(),
            direct_booking: true,
        }
    }

    #[test]
    fn test_date_policy_archives_past_start_dates() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let today = utc_today(now);
        let policy = ArchivalPolicy::ByStartDate;

        let yesterday = sample_camp(now - Duration::days(1));
        let tomorrow = sample_camp(now + Duration::days(1));
        let earlier_today = sample_camp(now - Duration::hours(3));

        assert!(policy.is_archived(&yesterday, today));
        assert!(!policy.is_archived(&tomorrow, today));
        assert!(!policy.is_archived(&earlier_today, today));
    }

    #[test]
    fn test_status_policy_ignores_dates() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let today = utc_today(now);
        let policy = ArchivalPolicy::ByStatus;

        let mut future = sample_camp(now + Duration::days(30));
        future.status = CampStatus::Archived;
        assert!(policy.is_archived(&future, today));

        let past = sample_camp(now - Duration::days(30));
        assert!(!policy.is_archived(&past, today));
    }

    #[test]
    fn test_archival_policy_from_str() {
        assert_eq!("status".parse(), Ok(ArchivalPolicy::ByStatus));
        assert_eq!("start_date".parse(), Ok(ArchivalPolicy::ByStartDate));
        assert!("both".parse::<ArchivalPolicy>().is_err());
    }

    #[test]
    fn test_pricing_fields_are_exclusive() {
        assert_eq!(Pricing::Fixed(100.0).into_fields(), (Some(100.0), None));
        let (price, variants) = Pricing::Variants(vec![variant("A", Some(10.0))]).into_fields();
        assert_eq!(price, None);
        assert_eq!(variants.map(|v| v.len()), Some(1));
        assert_eq!(Pricing::OnRequest.into_fields(), (None, None));
    }

    #[test]
    fn test_pricing_from_legacy_fields_prefers_variants() {
        let both = Pricing::from_fields(Some(100.0), Some(vec![variant("A", Some(10.0))]));
        assert!(matches!(both, Pricing::Variants(_)));

        let empty_variants = Pricing::from_fields(Some(100.0), Some(vec![]));
        assert_eq!(empty_variants, Pricing::Fixed(100.0));

        assert_eq!(Pricing::from_fields(None, None), Pricing::OnRequest);
    }

    #[test]
    fn test_setting_variants_clears_price() {
        let patch = CampPatch {
            pricing: Some(Pricing::Variants(vec![variant("Неделя", Some(15_000.0))])),
            ..Default::default()
        };
        let mask = patch.field_mask();
        assert!(mask.contains(&"price"));
        assert!(mask.contains(&"variants"));

        let doc = patch.into_document(Utc::now());
        assert!(doc.price.is_none());
        assert_eq!(doc.variants.as_ref().map(|v| v[0].id.as_str()), Some("variant-1"));

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("price").is_none());
    }

    #[test]
    fn test_setting_price_clears_variants() {
        let patch = CampPatch {
            pricing: Some(Pricing::Fixed(9_900.0)),
            ..Default::default()
        };
        assert!(patch.field_mask().contains(&"variants"));

        let doc = patch.into_document(Utc::now());
        assert_eq!(doc.price, Some(9_900.0));
        assert!(doc.variants.is_none());
    }

    #[test]
    fn test_null_clears_optional_fields() {
        let patch: CampPatch = serde_json::from_value(serde_json::json!({
            "image": null,
            "ageGroup": null,
        }))
        .unwrap();
        assert_eq!(patch.image, Some(None));
        assert_eq!(patch.age_group, Some(None));
        assert_eq!(patch.difficulty, None);

        let mask = patch.field_mask();
        assert!(mask.contains(&"image"));
        assert!(mask.contains(&"ageGroup"));
        assert!(!mask.contains(&"difficulty"));

        let json = serde_json::to_value(patch.into_document(Utc::now())).unwrap();
        assert!(json.get("image").is_none());
        assert!(json.get("ageGroup").is_none());
    }

    #[test]
    fn test_patch_document_deserializes() {
        let doc = CampPatch {
            title: Some("Кэмп".to_string()),
            pricing: Some(Pricing::Fixed(100.0)),
            ..Default::default()
        }
        .into_document(Utc::now());
        let json = serde_json::to_value(&doc).unwrap();
        let back: CampPatchDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back.title.as_deref(), Some("Кэмп"));
        assert_eq!(back.price, Some(100.0));
        assert!(back.variants.is_none());
    }

    #[test]
    fn test_patch_without_pricing_leaves_pricing_alone() {
        let patch = CampPatch {
            title: Some("Новое название".to_string()),
            ..Default::default()
        };
        assert_eq!(patch.field_mask(), vec!["updatedAt", "title"]);
    }

    #[test]
    fn test_new_camp_validation() {
        assert!(new_camp().validate().is_ok());

        let mut camp = new_camp();
        camp.title = "   ".to_string();
        assert!(camp.validate().is_err());

        let mut camp = new_camp();
        camp.camp_url = "not a url".to_string();
        assert!(camp.validate().is_err());

        let mut camp = new_camp();
        camp.end_date = camp.start_date;
        assert!(camp.validate().is_err());

        let mut camp = new_camp();
        camp.pricing = Pricing::Variants(vec![]);
        assert!(camp.validate().is_err());

        let mut camp = new_camp();
        camp.pricing = Pricing::Variants(vec![variant("A", Some(0.0))]);
        assert!(camp.validate().is_err());

        let mut camp = new_camp();
        camp.pricing = Pricing::Variants(vec![variant("A", None)]);
        assert!(camp.validate().is_ok());
    }

    #[test]
    fn test_patch_dates_checked_against_current_camp() {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        let current = sample_camp(start);

        let patch = CampPatch {
            end_date: Some(start - Duration::days(1)),
            ..Default::default()
        };
        assert!(patch.check_dates_against(&current).is_err());

        let patch = CampPatch {
            start_date: Some(start + Duration::days(1)),
            ..Default::default()
        };
        assert!(patch.check_dates_against(&current).is_ok());
    }

    #[test]
    fn test_variant_price_range() {
        let pricing = Pricing::Variants(vec![
            variant("A", Some(30_000.0)),
            variant("B", None),
            variant("C", Some(12_000.0)),
        ]);
        assert_eq!(pricing.price_range(), Some((12_000.0, 30_000.0)));
        assert_eq!(Pricing::Variants(vec![variant("A", None)]).price_range(), None);
    }

    #[test]
    fn test_filter_by_location_and_months() {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        let camp = sample_camp(start);

        let filter = CampFilter {
            location: Some("карелия".to_string()),
            months: Some("6".to_string()),
            ..Default::default()
        };
        let months = filter.months().unwrap();
        assert!(filter.matches(&camp, &months));

        let filter = CampFilter {
            months: Some("0,1".to_string()),
            ..Default::default()
        };
        let months = filter.months().unwrap();
        assert!(!filter.matches(&camp, &months));

        let filter = CampFilter {
            months: Some("12".to_string()),
            ..Default::default()
        };
        assert!(filter.months().is_err());
    }

    #[test]
    fn test_filter_by_price() {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        let mut camp = sample_camp(start);

        let filter = CampFilter {
            price_from: Some(20_000.0),
            price_to: Some(30_000.0),
            ..Default::default()
        };
        assert!(filter.matches(&camp, &[]));

        camp.pricing = Pricing::OnRequest;
        assert!(!filter.matches(&camp, &[]));

        camp.pricing = Pricing::Variants(vec![
            variant("A", Some(5_000.0)),
            variant("B", Some(21_000.0)),
        ]);
        assert!(filter.matches(&camp, &[]));

        let cheap_only = CampFilter {
            price_to: Some(1_000.0),
            ..Default::default()
        };
        assert!(!cheap_only.matches(&camp, &[]));
    }

    #[test]
    fn test_filter_by_type_and_dates() {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        let camp = sample_camp(start);

        let filter = CampFilter {
            types: Some("зимний, летний".to_string()),
            from: Some(start - Duration::days(1)),
            until: Some(start + Duration::days(10)),
            ..Default::default()
        };
        assert!(filter.matches(&camp, &[]));

        let filter = CampFilter {
            types: Some("зимний".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&camp, &[]));
        assert_eq!(filter.single_type(), Some("зимний"));
    }

    #[test]
    fn test_single_type_needs_exactly_one() {
        let filter = CampFilter {
            types: Some("зимний, летний".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.single_type(), None);
        assert_eq!(CampFilter::default().single_type(), None);
    }
}
