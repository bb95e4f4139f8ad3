//! PII redaction applied to every resume and job description before it reaches the LLM.
//!
//! Passes run in a fixed order: email → phone (three layered patterns) → address → SSN → ZIP.
//! The order matters: SSNs must be consumed before the ZIP pass, which would otherwise
//! swallow any bare five-digit run. Placeholders contain no digits or `@`, so a second pass
//! over already-masked text is a no-op.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const EMAIL_PLACEHOLDER: &str = "[EMAIL]";
pub const PHONE_PLACEHOLDER: &str = "[PHONE]";
pub const ADDRESS_PLACEHOLDER: &str = "[ADDRESS]";
pub const SSN_PLACEHOLDER: &str = "[SSN]";
pub const ZIP_PLACEHOLDER: &str = "[ZIP]";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("valid email regex")
});

// Layered phone patterns: international/loose first, then strict domestic forms.
static PHONE_LOOSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("valid loose phone regex")
});
static PHONE_DASHED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}-\d{3}-\d{4}\b").expect("valid dashed phone regex"));
static PHONE_AREA_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\(\d{3}\)\s?\d{3}-\d{4}\b").expect("valid area-code phone regex")
});

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd)",
    )
    .expect("valid address regex")
});

static SSN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("valid ssn regex"));

static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{5}(-\d{4})?\b").expect("valid zip regex"));

/// Text that has been through [`mask`]. Only the redactor can construct one, so anything
/// holding a `RedactedText` is safe to forward to the generation capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedactedText(String);

impl RedactedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RedactedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces every recognized PII substring with its category placeholder.
///
/// Empty input yields empty output. Text that matches nothing passes through unchanged.
pub fn mask(text: &str) -> RedactedText {
    if text.is_empty() {
        return RedactedText::default();
    }

    let passes: [(&Lazy<Regex>, &str); 7] = [
        (&EMAIL_RE, EMAIL_PLACEHOLDER),
        (&PHONE_LOOSE_RE, PHONE_PLACEHOLDER),
        (&PHONE_DASHED_RE, PHONE_PLACEHOLDER),
        (&PHONE_AREA_CODE_RE, PHONE_PLACEHOLDER),
        (&ADDRESS_RE, ADDRESS_PLACEHOLDER),
        (&SSN_RE, SSN_PLACEHOLDER),
        (&ZIP_RE, ZIP_PLACEHOLDER),
    ];

    let mut masked = text.to_string();
    for (pattern, placeholder) in passes {
        // NoExpand: placeholders are literal, `$` must never be read as a group reference.
        masked = pattern
            .replace_all(&masked, regex::NoExpand(placeholder))
            .into_owned();
    }

    RedactedText(masked)
}

/// Masks a resume and a job description together.
pub fn mask_pair(resume_text: &str, job_description: &str) -> (RedactedText, RedactedText) {
    (mask(resume_text), mask(job_description))
}
