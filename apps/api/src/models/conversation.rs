use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What produced a conversation entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Chat,
    Evaluation,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Chat => "chat",
            EntryKind::Evaluation => "evaluation",
        }
    }

    /// Unknown labels read back from storage are treated as chat turns.
    pub fn from_label(label: &str) -> Self {
        match label {
            "evaluation" => EntryKind::Evaluation,
            _ => EntryKind::Chat,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question/response pair. Never edited or deleted once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    pub question: String,
    pub response: String,
}

impl ConversationEntry {
    pub fn new(kind: EntryKind, question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            question: question.into(),
            response: response.into(),
        }
    }
}

/// Row shape of the `conversations` table. `seq` carries insertion order.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    #[allow(dead_code)]
    pub seq: i64,
    pub id: Uuid,
    pub kind: String,
    pub question: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl From<ConversationRow> for ConversationEntry {
    fn from(row: ConversationRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.created_at,
            kind: EntryKind::from_label(&row.kind),
            question: row.question,
            response: row.response,
        }
    }
}
