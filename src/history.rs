//! Session-scoped prediction history.
//!
//! One in-memory map, keyed by session id, shared across handlers via
//! [`crate::AppState`]. Handlers receive the session id explicitly; there
//! is no ambient session object. History lives only as long as the
//! process (no persistence by design).

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::PredictionRecord;

/// Newest-first prediction log per browser session.
#[derive(Clone, Default)]
pub struct HistoryStore {
    inner: Arc<RwLock<HashMap<Uuid, Vec<PredictionRecord>>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block of records to the given session's history.
    ///
    /// The block goes to the front (newest-first), preserving the relative
    /// order of the records inside the block. Creates the history if the
    /// session has none yet.
    pub fn append(&self, session: Uuid, records: Vec<PredictionRecord>) {
        if records.is_empty() {
            return;
        }
        let mut map = self.inner.write();
        let history = map.entry(session).or_default();
        history.splice(0..0, records);
    }

    /// Snapshot of the session's history, newest-first. Empty if the
    /// session has no history.
    pub fn read(&self, session: Uuid) -> Vec<PredictionRecord> {
        self.inner
            .read()
            .get(&session)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop all history for the session.
    pub fn clear(&self, session: Uuid) {
        self.inner.write().remove(&session);
    }
}
