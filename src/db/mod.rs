//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const REPORTS: &str = "reports";
    /// Login sessions (keyed by opaque session token)
    pub const SESSIONS: &str = "sessions";
}
