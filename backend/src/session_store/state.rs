//! Holds unconfirmed upload batches between the upload and confirm steps.
//!
//! The store is the only stateful component of the service: a keyed map from
//! an opaque session id to the [`PreviewEntry`] produced by the upload
//! endpoint. It is created once in `main.rs` and injected into handlers as
//! `web::Data<PreviewStore>`. Handlers never touch the map directly; the
//! `insert`/`get`/`remove` methods are the whole lookup contract, so a
//! durable backend could replace the map without changing any caller.

use common::model::session::PreviewEntry;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe, shareable container for pending preview sessions.
#[derive(Clone, Default)]
pub struct PreviewStore {
    sessions: Arc<RwLock<HashMap<String, PreviewEntry>>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        PreviewStore::default()
    }

    /// Stores `entry` under a fresh session id and returns the id.
    pub async fn insert(&self, entry: PreviewEntry) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), entry);
        session_id
    }

    /// Returns a copy of the entry for `session_id`, if it is still pending.
    pub async fn get(&self, session_id: &str) -> Option<PreviewEntry> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Removes and returns the entry for `session_id`.
    pub async fn remove(&self, session_id: &str) -> Option<PreviewEntry> {
        self.sessions.write().await.remove(session_id)
    }
}
