//! Per-credential cache of assistant handles with an optional time-to-live.
//!
//! Lookups take a read lock; inserts take a write lock and keep an existing fresh entry, so
//! two tasks that raced on the same miss both end up with the same cached handle.

use gateway_core::AssistantHandle;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CachedAssistant {
    handle: AssistantHandle,
    fetched_at: Instant,
}

/// Map from credential to assistant handle and the instant it was fetched.
#[derive(Debug, Default)]
pub struct AssistantCache {
    entries: RwLock<HashMap<String, CachedAssistant>>,
    /// None: entries never expire.
    ttl: Option<Duration>,
}

impl AssistantCache {
    /// Cache whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_fresh(&self, entry: &CachedAssistant) -> bool {
        match self.ttl {
            Some(ttl) => entry.fetched_at.elapsed() < ttl,
            None => true,
        }
    }

    /// Returns the cached handle for `credential` unless it is missing or expired.
    pub async fn get(&self, credential: &str) -> Option<AssistantHandle> {
        let entries = self.entries.read().await;
        entries
            .get(credential)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.handle.clone())
    }

    /// Stores `handle` for `credential` and returns the handle now cached.
    ///
    /// If another task already stored a fresh handle, that one is kept and returned.
    pub async fn insert(&self, credential: &str, handle: AssistantHandle) -> AssistantHandle {
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(credential) {
            if self.is_fresh(existing) {
                return existing.handle.clone();
            }
        }
        entries.insert(
            credential.to_string(),
            CachedAssistant {
                handle: handle.clone(),
                fetched_at: Instant::now(),
            },
        );
        handle
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
