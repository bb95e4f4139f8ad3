use std::sync::Arc;

use crate::chat::ChatResponder;
use crate::config::Config;
use crate::conversation::ConversationLog;
use crate::llm_client::TextGenerator;
use crate::pipeline::EvaluationPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Same log instance the pipeline and responder write to.
    pub conversations: ConversationLog,
    pub pipeline: EvaluationPipeline,
    pub chat: ChatResponder,
}

impl AppState {
    /// Wires the pipeline and the chat responder to one generator and one log.
    pub fn new(config: Config, generator: Arc<dyn TextGenerator>, conversations: ConversationLog) -> Self {
        Self {
            pipeline: EvaluationPipeline::new(Arc::clone(&generator), conversations.clone()),
            chat: ChatResponder::new(generator, conversations.clone()),
            conversations,
            config,
        }
    }
}
