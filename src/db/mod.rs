//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const CAMPS: &str = "camps";
    pub const ORGANIZERS: &str = "organizers";
    pub const CAMP_TYPES: &str = "campTypes";
    pub const BOOKING_REQUESTS: &str = "bookingRequests";
    /// Keyed by identity-provider uid
    pub const USER_PROFILES: &str = "userProfiles";
    pub const EVENTS: &str = "events";
}
