//! Chat Responder: answers ad hoc career questions.
//!
//! Context = redacted resume + redacted job description + the full conversation log.
//! Generation failures are the one recovered error: the caller gets `FALLBACK_RESPONSE`.
//! Every turn is recorded, fallback included.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::chat::prompts::*;
use crate::conversation::ConversationLog;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::models::conversation::{ConversationEntry, EntryKind};
use crate::redaction::{mask_pair, RedactedText};
use crate::sanitize::{decode_entities, strip_thoughts};

#[derive(Clone)]
pub struct ChatResponder {
    generator: Arc<dyn TextGenerator>,
    log: ConversationLog,
}

impl ChatResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, log: ConversationLog) -> Self {
        Self { generator, log }
    }

    /// Answers `question`. Never fails: generation errors yield `FALLBACK_RESPONSE`.
    pub async fn respond(&self, question: &str, resume_text: &str, job_description: &str) -> String {
        let (resume, jd) = mask_pair(resume_text, job_description);
        let history = self.log.entries().await;

        let greet = history.is_empty() && is_greeting(question);
        if greet {
            debug!("First-time greeting; injecting welcome instruction");
        }

        let request = GenerationRequest {
            role: CHAT_ROLE.to_string(),
            goal: CHAT_GOAL.to_string(),
            backstory: CHAT_BACKSTORY.to_string(),
            instructions: build_instructions(question, greet),
            context: build_context(&resume, &jd, &history),
            expected_output: CHAT_EXPECTED_OUTPUT.to_string(),
        };

        let response = match self.generator.generate(&request).await {
            Ok(text) => {
                let cleaned = clean_response(&text);
                if greet && !cleaned.contains(WELCOME_MESSAGE) {
                    format!("{WELCOME_MESSAGE} {cleaned}").trim_end().to_string()
                } else {
                    cleaned
                }
            }
            Err(e) => {
                warn!("Error in chat response, using fallback: {e}");
                FALLBACK_RESPONSE.to_string()
            }
        };

        self.log
            .record(EntryKind::Chat, question, response.clone())
            .await;

        response
    }
}

/// True if any whitespace/punctuation-delimited token of the lowercased question is a greeting.
pub fn is_greeting(question: &str) -> bool {
    question
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| GREETING_TOKENS.contains(&token))
}

fn build_instructions(question: &str, greet: bool) -> String {
    let greeting = if greet {
        GREETING_INSTRUCTION.replace("{welcome}", WELCOME_MESSAGE)
    } else {
        String::new()
    };
    CHAT_INSTRUCTIONS
        .replace("{question}", question)
        .replace("{greeting_instruction}", &greeting)
}

/// Renders documents (when present) followed by every prior Q/A pair, oldest first.
fn build_context(resume: &RedactedText, jd: &RedactedText, history: &[ConversationEntry]) -> String {
    let mut context = String::new();
    if !resume.is_empty() {
        context.push_str(&format!("\nFull Resume Details: {resume}"));
    }
    if !jd.is_empty() {
        context.push_str(&format!("\nJob Description: {jd}"));
    }
    if !history.is_empty() {
        context.push_str("\nPrevious conversation history:\n");
        for entry in history {
            context.push_str(&format!("Q: {}\nA: {}\n\n", entry.question, entry.response));
        }
    }
    context
}

fn clean_response(text: &str) -> String {
    strip_thoughts(&decode_entities(text)).trim().to_string()
}
