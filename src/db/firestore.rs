// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile plus embedded health logs)
//! - Reports (point-in-time health reports)
//! - Sessions (server-side login sessions)
//!
//! The wrapper also carries an in-memory backend so handler tests can run
//! without an emulator; both backends expose the same operations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Report, Session, User};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    /// Real Firestore (production or emulator).
    Live(firestore::FirestoreDb),
    /// In-process document store for offline tests.
    Mem(MemStore),
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Live(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
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
            backend: Backend::Live(client),
        })
    }

    /// Create an in-memory database for offline tests.
    ///
    /// Documents live in process memory and queries see writes immediately.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Mem(MemStore::default()),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Live(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(user_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Mem(store) => store.get(collections::USERS, user_id),
        }
    }

    /// Look up a user by email address.
    ///
    /// Emails are unique only by convention; callers check this before
    /// inserting, so the first match is the user.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Live(client) => {
                let email = email.to_string();
                let users: Vec<User> = client
                    .fluent()
                    .select()
                    .from(collections::USERS)
                    .filter(move |q| q.for_all([q.field("email").eq(email.clone())]))
                    .limit(1)
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(users.into_iter().next())
            }
            Backend::Mem(store) => {
                let users: Vec<User> = store.all(collections::USERS)?;
                Ok(users.into_iter().find(|u| u.email == email))
            }
        }
    }

    /// Create or update a user document.
    pub async fn save_user(&self, user: &User) -> Result<(), AppError> {
        match &self.backend {
            Backend::Live(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(&user.user_id)
                    .object(user)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Mem(store) => store.upsert(collections::USERS, &user.user_id, user),
        }
    }

    // ─── Report Operations ───────────────────────────────────────

    /// Store a health report.
    pub async fn save_report(&self, report: &Report) -> Result<(), AppError> {
        match &self.backend {
            Backend::Live(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::REPORTS)
                    .document_id(&report.report_id)
                    .object(report)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Mem(store) => store.upsert(collections::REPORTS, &report.report_id, report),
        }
    }

    /// Get all reports for a user, newest first.
    pub async fn get_reports_for_user(&self, user_id: &str) -> Result<Vec<Report>, AppError> {
        match &self.backend {
            Backend::Live(client) => {
                let user_id = user_id.to_string();
                client
                    .fluent()
                    .select()
                    .from(collections::REPORTS)
                    .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
                    .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
            Backend::Mem(store) => {
                let mut reports: Vec<Report> = store.all(collections::REPORTS)?;
                reports.retain(|r| r.user_id == user_id);
                // Newest first; equal timestamps resolve to the latest insertion.
                reports.reverse();
                reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(reports)
            }
        }
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Get a session by its token.
    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>, AppError> {
        match &self.backend {
            Backend::Live(client) => client
                .fluent()
                .select()
                .by_id_in(collections::SESSIONS)
                .obj()
                .one(session_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Mem(store) => store.get(collections::SESSIONS, session_id),
        }
    }

    /// Store a session document.
    pub async fn save_session(&self, session: &Session) -> Result<(), AppError> {
        match &self.backend {
            Backend::Live(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::SESSIONS)
                    .document_id(&session.session_id)
                    .object(session)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Mem(store) => {
                store.upsert(collections::SESSIONS, &session.session_id, session)
            }
        }
    }

    /// Delete a session (logout or expiry sweep).
    pub async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Live(client) => {
                client
                    .fluent()
                    .delete()
                    .from(collections::SESSIONS)
                    .document_id(session_id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Mem(store) => store.delete(collections::SESSIONS, session_id),
        }
    }
}

/// Insertion-ordered document store backing the offline mode.
///
/// Collection name maps to a list of `(document_id, json)` pairs. A Vec
/// rather than a map keeps insertion order, which stands in for Firestore's
/// commit order in list queries.
#[derive(Clone, Default)]
struct MemStore {
    collections: Arc<Mutex<HashMap<String, Vec<(String, serde_json::Value)>>>>,
}

impl MemStore {
    fn with<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Vec<(String, serde_json::Value)>>) -> R,
    ) -> Result<R, AppError> {
        let mut guard = self
            .collections
            .lock()
            .map_err(|_| AppError::Database("in-memory store lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }

    fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<T>, AppError> {
        let value = self.with(|docs| {
            docs.get(collection)
                .and_then(|entries| entries.iter().find(|entry| entry.0 == doc_id))
                .map(|entry| entry.1.clone())
        })?;
        value
            .map(|v| serde_json::from_value(v).map_err(|e| AppError::Database(e.to_string())))
            .transpose()
    }

    fn upsert<T: Serialize>(
        &self,
        collection: &str,
        doc_id: &str,
        object: &T,
    ) -> Result<(), AppError> {
        let value = serde_json::to_value(object).map_err(|e| AppError::Database(e.to_string()))?;
        self.with(|docs| {
            let entries = docs.entry(collection.to_string()).or_default();
            match entries.iter_mut().find(|entry| entry.0 == doc_id) {
                Some(entry) => entry.1 = value,
                None => entries.push((doc_id.to_string(), value)),
            }
        })
    }

    fn delete(&self, collection: &str, doc_id: &str) -> Result<(), AppError> {
        self.with(|docs| {
            if let Some(entries) = docs.get_mut(collection) {
                entries.retain(|entry| entry.0 != doc_id);
            }
        })
    }

    fn all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        let values = self.with(|docs| docs.get(collection).cloned().unwrap_or_default())?;
        values
            .into_iter()
            .map(|(_, v)| serde_json::from_value(v).map_err(|e| AppError::Database(e.to_string())))
            .collect()
    }
}
