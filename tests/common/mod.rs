// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use camp_booking::config::Config;
use camp_booking::db::FirestoreDb;
use camp_booking::middleware::auth::create_jwt;
use camp_booking::models::user::UserProfileDocument;
use camp_booking::models::Role;
use camp_booking::routes::create_router;
use camp_booking::services::FirebaseTokenVerifier;
use camp_booking::AppState;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Key id of the static identity-provider test key.
#[allow(dead_code)]
pub const TEST_KID: &str = "test-kid";

const IDENTITY_PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/test_identity_key.pem");
const IDENTITY_PUBLIC_KEY: &[u8] = include_bytes!("../fixtures/test_identity_key.pub.pem");

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Uids of the profiles known to the offline database.
#[allow(dead_code)]
pub const ADMIN_UID: &str = "admin-1";
#[allow(dead_code)]
pub const MODERATOR_UID: &str = "mod-1";
#[allow(dead_code)]
pub const USER_UID: &str = "user-1";

fn profile(uid: &str, role: Role) -> UserProfileDocument {
    let mut doc = UserProfileDocument::new_default(
        uid,
        &format!("{uid}@example.com"),
        None,
        None,
        chrono::Utc::now(),
    );
    doc.role = role;
    doc
}

/// Create a mock database connection (offline).
///
/// Only the seeded profile lookups succeed; everything else fails.
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock_with_profiles([
        profile(ADMIN_UID, Role::Admin),
        profile(MODERATOR_UID, Role::Moderator),
        profile(USER_UID, Role::User),
    ])
}

/// Identity verifier trusting only the fixture key.
#[allow(dead_code)]
pub fn test_identity_verifier(config: &Config) -> FirebaseTokenVerifier {
    let key = DecodingKey::from_rsa_pem(IDENTITY_PUBLIC_KEY).expect("fixture public key");
    FirebaseTokenVerifier::new_with_static_key(config, TEST_KID, key).expect("static verifier")
}

/// Create a test app over the given database.
#[allow(dead_code)]
pub fn create_test_app_with_db(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let verifier = Arc::new(test_identity_verifier(&config));
    let state = Arc::new(AppState::new(config, db, verifier));
    (create_router(state.clone()), state)
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(test_db_offline())
}

/// Session token for `uid`, signed with the test config key.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str) -> String {
    let config = Config::test_default();
    create_jwt(uid, &format!("{uid}@example.com"), &config.jwt_signing_key, 1).expect("test JWT")
}

/// Session token of the offline profile holding `role`.
#[allow(dead_code)]
pub fn session_token(role: Role) -> String {
    create_test_jwt(match role {
        Role::Admin => ADMIN_UID,
        Role::Moderator => MODERATOR_UID,
        Role::User => USER_UID,
    })
}

#[derive(Serialize)]
struct IdTokenClaims<'a> {
    iss: String,
    aud: &'a str,
    sub: &'a str,
    iat: u64,
    exp: u64,
    auth_time: u64,
    email: &'a str,
    name: Option<&'a str>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Mint an identity-provider ID token signed with the fixture key.
#[allow(dead_code)]
pub fn create_id_token(project: &str, uid: &str, email: &str) -> String {
    create_id_token_with(project, uid, email, now_secs(), TEST_KID)
}

#[allow(dead_code)]
pub fn create_id_token_with(project: &str, uid: &str, email: &str, iat: u64, kid: &str) -> String {
    let claims = IdTokenClaims {
        iss: format!("https://securetoken.google.com/{project}"),
        aud: project,
        sub: uid,
        iat,
        exp: iat + 3600,
        auth_time: iat,
        email,
        name: Some("Тестовый Пользователь"),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());

    let key = EncodingKey::from_rsa_pem(IDENTITY_PRIVATE_KEY).expect("fixture private key");
    encode(&header, &claims, &key).expect("signed ID token")
}

/// Unique id for test isolation against a shared emulator.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("JSON body")
}
