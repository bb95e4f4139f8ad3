//! Conversation Log: append-only record of question/response pairs.
//!
//! The log is injected into the chat responder and the evaluation pipeline; nothing reaches
//! for a global. Storage is pluggable behind `ConversationStore`. Store failures never abort
//! the user-facing operation: writes are logged and dropped, reads degrade to an empty history.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::conversation::{ConversationEntry, EntryKind};

pub mod store;

pub use store::{InMemoryConversationStore, PgConversationStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable storage for conversation entries.
///
/// `append` calls must be serialized by the implementation; `list_all` returns entries
/// oldest first, in insertion order.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append(&self, entry: &ConversationEntry) -> Result<(), StoreError>;
    async fn list_all(&self) -> Result<Vec<ConversationEntry>, StoreError>;
}

/// Shared handle over a `ConversationStore` that absorbs store failures.
#[derive(Clone)]
pub struct ConversationLog {
    store: Arc<dyn ConversationStore>,
}

impl ConversationLog {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Log backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryConversationStore::default()))
    }

    /// Appends an entry. Failures are logged and swallowed.
    pub async fn record(
        &self,
        kind: EntryKind,
        question: impl Into<String>,
        response: impl Into<String>,
    ) -> ConversationEntry {
        let entry = ConversationEntry::new(kind, question, response);
        match self.store.append(&entry).await {
            Ok(()) => debug!("Recorded {} conversation entry {}", entry.kind, entry.id),
            Err(e) => error!("Error saving conversation: {e}"),
        }
        entry
    }

    /// Snapshot of every entry, oldest first. Empty if the store cannot be read.
    pub async fn entries(&self) -> Vec<ConversationEntry> {
        match self.store.list_all().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error loading conversations: {e}");
                Vec::new()
            }
        }
    }
}
