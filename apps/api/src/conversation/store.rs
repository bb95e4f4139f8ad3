use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use super::{ConversationStore, StoreError};
use crate::models::conversation::{ConversationEntry, ConversationRow};

/// Postgres-backed store. Insertion order is carried by the `seq` BIGSERIAL column.
#[derive(Clone)]
pub struct PgConversationStore {
    pool: PgPool,
}

impl PgConversationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PgConversationStore {
    async fn append(&self, entry: &ConversationEntry) -> Result<(), StoreError> {
        // Append-only: INSERT, never UPDATE.
        sqlx::query(
            r#"
            INSERT INTO conversations (id, kind, question, response, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id)
        .bind(entry.kind.as_str())
        .bind(&entry.question)
        .bind(&entry.response)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ConversationEntry>, StoreError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            "SELECT seq, id, kind, question, response, created_at FROM conversations ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ConversationEntry::from).collect())
    }
}

/// Process-local store. The write lock serializes appenders; readers clone a snapshot.
#[derive(Default)]
pub struct InMemoryConversationStore {
    entries: RwLock<Vec<ConversationEntry>>,
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(&self, entry: &ConversationEntry) -> Result<(), StoreError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ConversationEntry>, StoreError> {
        Ok(self.entries.read().await.clone())
    }
}
