//! In-memory session store.
//!
//! Maps a session id to the chunk sequence of one uploaded document. The
//! store is constructed explicitly and injected through `AppState`, so tests
//! build a fresh one per case. Sessions live until cleared or the process
//! exits; there is no eviction.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use docqa_ingest::Chunk;

/// Server-side record linking an uploaded document's chunks to an id used
/// across subsequent questions.
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub filename: String,
    pub chunks: Vec<Chunk>,
    pub created_at: DateTime<Utc>,
}

/// Lock-protected map of in-flight sessions.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new session under a fresh unique id.
    ///
    /// Callers must pass a non-empty chunk sequence; a successful ingest
    /// always produces one.
    pub fn create(&self, filename: String, chunks: Vec<Chunk>) -> Arc<Session> {
        debug_assert!(!chunks.is_empty());
        let session = Arc::new(Session {
            id: Uuid::new_v4().to_string(),
            filename,
            chunks,
            created_at: Utc::now(),
        });
        self.inner
            .write()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        session
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.inner.read().unwrap().get(id).cloned()
    }

    /// Remove a session. Returns `false` when the id is unknown.
    pub fn remove(&self, id: &str) -> bool {
        self.inner.write().unwrap().remove(id).is_some()
    }

    /// Active session ids, sorted for stable output.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.read().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
