// Chat Responder: single-stage career Q&A over redacted documents + conversation history.

pub mod handlers;
pub mod prompts;
pub mod responder;

pub use responder::ChatResponder;
