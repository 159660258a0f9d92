// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User profiles (ensure-or-create, roles)
//! - Camps, camp types and organizers
//! - Booking requests
//! - Events (scoped to their owner)
//!
//! Every operation returns domain types; the stored document shapes stay
//! inside this module and `models`.

use crate::db::collections;
use crate::error::AppError;
use crate::models::booking::{BookingRequestDocument, BookingStatusPatch};
use crate::models::camp::{CampDocument, CampPatch, NewCamp};
use crate::models::camp_type::{CampTypeDocument, CampTypePatch, NewCampType};
use crate::models::event::{EventDocument, EventPatch, NewEvent};
use crate::models::organizer::{NewOrganizer, OrganizerDocument, OrganizerPatch};
use crate::models::user::{UpdateUserProfile, UserProfileDocument, UserProfilePatch};
use crate::models::{
    BookingRequest, BookingStatus, Camp, CampType, Event, Organizer, Role, UserProfile,
};
use chrono::Utc;
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;
use futures_util::{stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

const MAX_CONCURRENT_DB_OPS: usize = 8;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    /// Profiles visible to `get_user_profile` when offline.
    offline_profiles: Arc<HashMap<String, UserProfileDocument>>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator takes an unauthenticated connection; skip local credentials.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            offline_profiles: Arc::default(),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            offline_profiles: Arc::default(),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self::new_mock_with_profiles([])
    }

    /// Offline client that can still look up the given user profiles.
    ///
    /// Every other operation fails as with [`FirestoreDb::new_mock`].
    pub fn new_mock_with_profiles(
        profiles: impl IntoIterator<Item = UserProfileDocument>,
    ) -> Self {
        Self {
            client: None,
            offline_profiles: Arc::new(
                profiles
                    .into_iter()
                    .map(|doc| (doc.uid.clone(), doc))
                    .collect(),
            ),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Generic Helpers ───────────────────────────────────────────

    async fn get_document<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert under a generated document id.
    async fn insert_document<T>(&self, collection: &str, doc: &T) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.get_client()?
            .fluent()
            .insert()
            .into(collection)
            .generate_document_id()
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Masked partial write; returns the full document after the update.
    ///
    /// Fields named in `mask` but absent from `patch` are deleted. The
    /// document must exist: a masked write would otherwise recreate a
    /// deleted document holding only the patched fields.
    async fn update_fields<P, T>(
        &self,
        collection: &str,
        id: &str,
        mask: Vec<&'static str>,
        patch: &P,
    ) -> Result<T, AppError>
    where
        P: Serialize + DeserializeOwned + Send + Sync,
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .update()
            .fields(mask)
            .in_col(collection)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(id)
            .object(patch)
            .execute()
            .await
            .map_err(|e| match e {
                FirestoreError::DataNotFoundError(_) => {
                    AppError::NotFound(format!("Document {collection}/{id} not found"))
                }
                e => AppError::Database(e.to_string()),
            })
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Profile Operations ─────────────────────────────────

    /// Get a profile by identity uid.
    pub async fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        if self.client.is_none() {
            return Ok(self.offline_profiles.get(uid).cloned().map(UserProfile::from));
        }
        let doc: Option<UserProfileDocument> =
            self.get_document(collections::USER_PROFILES, uid).await?;
        Ok(doc.map(UserProfile::from))
    }

    /// Return the stored profile for `uid`, creating a default one if absent.
    ///
    /// The create is keyed by uid and create-only: if another request wins
    /// the race the stored profile is re-read, so an existing role is never
    /// overwritten and no duplicate is ever written.
    pub async fn ensure_user_profile(
        &self,
        uid: &str,
        email: &str,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Result<UserProfile, AppError> {
        if let Some(existing) = self.get_user_profile(uid).await? {
            return Ok(existing);
        }

        let profile =
            UserProfileDocument::new_default(uid, email, display_name, photo_url, Utc::now());

        let created: Result<UserProfileDocument, FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USER_PROFILES)
            .document_id(uid)
            .object(&profile)
            .execute()
            .await;

        match created {
            Ok(_) => {
                tracing::info!(uid, "Created user profile");
                Ok(profile.into())
            }
            Err(FirestoreError::DataConflictError(_)) => {
                tracing::debug!(uid, "Profile created concurrently, re-reading");
                self.get_user_profile(uid).await?.ok_or_else(|| {
                    AppError::Database(format!("Profile {uid} vanished after create conflict"))
                })
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// All profiles, newest first.
    pub async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        let docs: Vec<UserProfileDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USER_PROFILES)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.into_iter().map(UserProfile::from).collect())
    }

    pub async fn list_user_profiles_by_role(&self, role: Role) -> Result<Vec<UserProfile>, AppError> {
        let mut docs: Vec<UserProfileDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USER_PROFILES)
            .filter(|q| q.for_all([q.field("role").eq(role.as_str())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        // Sorted in memory to avoid a composite index
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs.into_iter().map(UserProfile::from).collect())
    }

    async fn find_user_profile_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserProfileDocument>, AppError> {
        let docs: Vec<UserProfileDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USER_PROFILES)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.into_iter().next())
    }

    /// Change a user's role. Returns `None` if the profile does not exist.
    pub async fn update_user_role(
        &self,
        uid: &str,
        role: Role,
    ) -> Result<Option<UserProfile>, AppError> {
        if self.get_user_profile(uid).await?.is_none() {
            return Ok(None);
        }

        let patch = UserProfilePatch::role(role, Utc::now());
        let doc: UserProfileDocument = self
            .update_fields(collections::USER_PROFILES, uid, patch.field_mask(), &patch)
            .await?;

        tracing::info!(uid, role = %role, "Updated user role");
        Ok(Some(doc.into()))
    }

    /// Change the role of the profile registered under `email`.
    pub async fn set_user_role_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> Result<UserProfile, AppError> {
        let profile = self
            .find_user_profile_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Пользователь {email} не найден")))?;

        self.update_user_role(&profile.uid, role)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Пользователь {email} не найден")))
    }

    /// Owner edits of display name and photo.
    pub async fn update_user_profile(
        &self,
        uid: &str,
        update: UpdateUserProfile,
    ) -> Result<Option<UserProfile>, AppError> {
        if self.get_user_profile(uid).await?.is_none() {
            return Ok(None);
        }

        let patch = UserProfilePatch::profile(update, Utc::now());
        let doc: UserProfileDocument = self
            .update_fields(collections::USER_PROFILES, uid, patch.field_mask(), &patch)
            .await?;
        Ok(Some(doc.into()))
    }

    /// Promote `uid` to admin, but only while no admin exists.
    ///
    /// Returns `Ok(None)` if an admin already exists. Two simultaneous first
    /// sign-ins can both be promoted; there is no transaction around this.
    pub async fn bootstrap_first_admin(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        let admins: Vec<UserProfileDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USER_PROFILES)
            .filter(|q| q.for_all([q.field("role").eq(Role::Admin.as_str())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !admins.is_empty() {
            tracing::debug!(uid, "Admin already exists, bootstrap skipped");
            return Ok(None);
        }

        let promoted = self.update_user_role(uid, Role::Admin).await?;
        if promoted.is_some() {
            tracing::warn!(uid, "Bootstrapped first admin");
        }
        Ok(promoted)
    }

    // ─── Camp Operations ─────────────────────────────────────────

    pub async fn get_camp(&self, id: &str) -> Result<Option<Camp>, AppError> {
        let doc: Option<CampDocument> = self.get_document(collections::CAMPS, id).await?;
        Ok(doc.map(Camp::from))
    }

    /// All camps, newest first.
    pub async fn list_camps(&self) -> Result<Vec<Camp>, AppError> {
        let docs: Vec<CampDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CAMPS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.into_iter().map(Camp::from).collect())
    }

    /// Camps whose `type` field equals `camp_type` exactly.
    pub async fn list_camps_by_type(&self, camp_type: &str) -> Result<Vec<Camp>, AppError> {
        let mut docs: Vec<CampDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CAMPS)
            .filter(|q| q.for_all([q.field("type").eq(camp_type)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs.into_iter().map(Camp::from).collect())
    }

    pub async fn create_camp(&self, camp: NewCamp) -> Result<Camp, AppError> {
        let doc = CampDocument::new(camp, Utc::now());
        let created = self.insert_document(collections::CAMPS, &doc).await?;
        let camp = Camp::from(created);
        tracing::info!(camp_id = %camp.id, title = %camp.title, "Created camp");
        Ok(camp)
    }

    /// Partial update. The caller checks that the camp exists.
    pub async fn update_camp(&self, id: &str, patch: CampPatch) -> Result<Camp, AppError> {
        let mask = patch.field_mask();
        let patch = patch.into_document(Utc::now());
        let mut doc: CampDocument = self
            .update_fields(collections::CAMPS, id, mask, &patch)
            .await?;
        doc.id = Some(id.to_string());
        tracing::info!(camp_id = id, "Updated camp");
        Ok(doc.into())
    }

    pub async fn delete_camp(&self, id: &str) -> Result<(), AppError> {
        self.delete_document(collections::CAMPS, id).await?;
        tracing::info!(camp_id = id, "Deleted camp");
        Ok(())
    }

    // ─── Camp Type Operations ────────────────────────────────────

    pub async fn get_camp_type(&self, id: &str) -> Result<Option<CampType>, AppError> {
        let doc: Option<CampTypeDocument> = self.get_document(collections::CAMP_TYPES, id).await?;
        Ok(doc.map(CampType::from))
    }

    /// All camp types, newest first, including inactive ones.
    pub async fn list_camp_types(&self) -> Result<Vec<CampType>, AppError> {
        let docs: Vec<CampTypeDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CAMP_TYPES)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.into_iter().map(CampType::from).collect())
    }

    /// Active camp types only. Filtered here since old documents lack `isActive`.
    pub async fn list_active_camp_types(&self) -> Result<Vec<CampType>, AppError> {
        Ok(self
            .list_camp_types()
            .await?
            .into_iter()
            .filter(|t| t.is_active)
            .collect())
    }

    pub async fn create_camp_type(&self, camp_type: NewCampType) -> Result<CampType, AppError> {
        let doc = CampTypeDocument::new(camp_type, Utc::now());
        let created = self.insert_document(collections::CAMP_TYPES, &doc).await?;
        let camp_type = CampType::from(created);
        tracing::info!(camp_type_id = %camp_type.id, name = %camp_type.name, "Created camp type");
        Ok(camp_type)
    }

    pub async fn update_camp_type(
        &self,
        id: &str,
        patch: CampTypePatch,
    ) -> Result<CampType, AppError> {
        let mask = patch.field_mask();
        let patch = patch.into_document(Utc::now());
        let mut doc: CampTypeDocument = self
            .update_fields(collections::CAMP_TYPES, id, mask, &patch)
            .await?;
        doc.id = Some(id.to_string());
        Ok(doc.into())
    }

    pub async fn delete_camp_type(&self, id: &str) -> Result<(), AppError> {
        self.delete_document(collections::CAMP_TYPES, id).await
    }

    /// Insert the given camp types if the collection is empty.
    ///
    /// Returns the created camp types; empty if any camp type already existed.
    pub async fn seed_camp_types(
        &self,
        seeds: Vec<NewCampType>,
    ) -> Result<Vec<CampType>, AppError> {
        let existing: Vec<CampTypeDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CAMP_TYPES)
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !existing.is_empty() {
            tracing::info!("Camp types already present, skipping seed");
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let created = stream::iter(seeds)
            .map(|seed| async move {
                let doc = CampTypeDocument::new(seed, now);
                self.insert_document(collections::CAMP_TYPES, &doc)
                    .await
                    .map(CampType::from)
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<CampType, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<CampType>, AppError>>()?;

        tracing::info!(count = created.len(), "Seeded camp types");
        Ok(created)
    }

    // ─── Organizer Operations ────────────────────────────────────

    pub async fn get_organizer(&self, id: &str) -> Result<Option<Organizer>, AppError> {
        let doc: Option<OrganizerDocument> = self.get_document(collections::ORGANIZERS, id).await?;
        Ok(doc.map(Organizer::from))
    }

    /// All organizers ordered by name, including inactive ones.
    pub async fn list_organizers(&self) -> Result<Vec<Organizer>, AppError> {
        let docs: Vec<OrganizerDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ORGANIZERS)
            .order_by([("name", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.into_iter().map(Organizer::from).collect())
    }

    pub async fn list_active_organizers(&self) -> Result<Vec<Organizer>, AppError> {
        Ok(self
            .list_organizers()
            .await?
            .into_iter()
            .filter(|o| o.is_active)
            .collect())
    }

    pub async fn create_organizer(&self, organizer: NewOrganizer) -> Result<Organizer, AppError> {
        let doc = OrganizerDocument::new(organizer, Utc::now());
        let created = self.insert_document(collections::ORGANIZERS, &doc).await?;
        let organizer = Organizer::from(created);
        tracing::info!(organizer_id = %organizer.id, "Created organizer");
        Ok(organizer)
    }

    pub async fn update_organizer(
        &self,
        id: &str,
        patch: OrganizerPatch,
    ) -> Result<Organizer, AppError> {
        let mask = patch.field_mask();
        let patch = patch.into_document(Utc::now());
        let mut doc: OrganizerDocument = self
            .update_fields(collections::ORGANIZERS, id, mask, &patch)
            .await?;
        doc.id = Some(id.to_string());
        Ok(doc.into())
    }

    pub async fn delete_organizer(&self, id: &str) -> Result<(), AppError> {
        self.delete_document(collections::ORGANIZERS, id).await
    }

    // ─── Booking Request Operations ──────────────────────────────

    pub async fn get_booking_request(&self, id: &str) -> Result<Option<BookingRequest>, AppError> {
        let doc: Option<BookingRequestDocument> = self
            .get_document(collections::BOOKING_REQUESTS, id)
            .await?;
        Ok(doc.map(BookingRequest::from))
    }

    /// All booking requests, newest first.
    pub async fn list_booking_requests(&self) -> Result<Vec<BookingRequest>, AppError> {
        let docs: Vec<BookingRequestDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::BOOKING_REQUESTS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(docs.into_iter().map(BookingRequest::from).collect())
    }

    pub async fn list_booking_requests_for_camp(
        &self,
        camp_id: &str,
    ) -> Result<Vec<BookingRequest>, AppError> {
        let mut docs: Vec<BookingRequestDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::BOOKING_REQUESTS)
            .filter(|q| q.for_all([q.field("campId").eq(camp_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs.into_iter().map(BookingRequest::from).collect())
    }

    /// Whether a request for this camp and contact already exists.
    ///
    /// With `owner` set, only requests submitted by that user are considered.
    pub async fn booking_request_exists(
        &self,
        camp_id: &str,
        contact: &str,
        owner: Option<&str>,
    ) -> Result<bool, AppError> {
        let docs: Vec<BookingRequestDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::BOOKING_REQUESTS)
            .filter(|q| {
                q.for_all([
                    q.field("campId").eq(camp_id),
                    q.field("contact").eq(contact),
                    owner.and_then(|uid| q.field("userId").eq(uid)),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(!docs.is_empty())
    }

    pub async fn create_booking_request(
        &self,
        request: &BookingRequestDocument,
    ) -> Result<BookingRequest, AppError> {
        let created = self
            .insert_document(collections::BOOKING_REQUESTS, request)
            .await?;
        let booking = BookingRequest::from(created);
        tracing::info!(
            booking_id = %booking.id,
            camp_id = %booking.camp_id,
            "Created booking request"
        );
        Ok(booking)
    }

    /// Write a new status. Transition rules are enforced by the caller.
    pub async fn set_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingRequest, AppError> {
        let patch = BookingStatusPatch {
            status,
            updated_at: Utc::now(),
        };
        let mut doc: BookingRequestDocument = self
            .update_fields(
                collections::BOOKING_REQUESTS,
                id,
                BookingStatusPatch::FIELD_MASK.to_vec(),
                &patch,
            )
            .await?;
        doc.id = Some(id.to_string());
        Ok(doc.into())
    }

    // ─── Event Operations ────────────────────────────────────────

    /// Get an event owned by `owner`. Other owners' events read as absent.
    pub async fn get_event(&self, owner: &str, id: &str) -> Result<Option<Event>, AppError> {
        let doc: Option<EventDocument> = self.get_document(collections::EVENTS, id).await?;
        Ok(doc.filter(|d| d.user_id == owner).map(Event::from))
    }

    /// Events of one owner, newest first.
    pub async fn list_events(&self, owner: &str) -> Result<Vec<Event>, AppError> {
        let mut docs: Vec<EventDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::EVENTS)
            .filter(|q| q.for_all([q.field("userId").eq(owner)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs.into_iter().map(Event::from).collect())
    }

    pub async fn create_event(&self, owner: &str, event: NewEvent) -> Result<Event, AppError> {
        let doc = EventDocument::new(owner, event, Utc::now());
        let created = self.insert_document(collections::EVENTS, &doc).await?;
        Ok(created.into())
    }

    /// Partial update. The caller checks ownership first.
    pub async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, AppError> {
        let mask = patch.field_mask();
        let patch = patch.into_document(Utc::now());
        let mut doc: EventDocument = self
            .update_fields(collections::EVENTS, id, mask, &patch)
            .await?;
        doc.id = Some(id.to_string());
        Ok(doc.into())
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), AppError> {
        self.delete_document(collections::EVENTS, id).await
    }
}
