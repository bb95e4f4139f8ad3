//! Post-processing for generated text before it is stored or returned.

use once_cell::sync::Lazy;
use regex::Regex;

/// Entity decoding is repeated to undo double encoding, but never more than this.
const MAX_DECODE_ROUNDS: usize = 3;

static THOUGHT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*Thought:[^\n]*(?:\n|$)").expect("valid thought-line regex")
});
static THOUGHT_INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Thought:[^\n]*").expect("valid inline thought regex"));

/// Removes every literal code-fence marker (```text and bare ```), then trims.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```text", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Decodes HTML entities, repeating while the text keeps changing (e.g. `&amp;quot;`).
pub fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for _ in 0..MAX_DECODE_ROUNDS {
        let next = html_escape::decode_html_entities(&decoded).into_owned();
        if next == decoded {
            break;
        }
        decoded = next;
    }
    decoded
}

/// Drops leaked reasoning: whole lines starting with `Thought:` and any inline
/// `Thought: ...` fragment up to the end of its line. Case-insensitive.
pub fn strip_thoughts(text: &str) -> String {
    let without_lines = THOUGHT_LINE_RE.replace_all(text, "");
    THOUGHT_INLINE_RE.replace_all(&without_lines, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_with_text_tag() {
        let input = "```text\n### Career Recommendations\n```";
        assert_eq!(strip_code_fences(input), "### Career Recommendations");
    }

    #[test]
    fn test_strip_code_fences_inline_markers() {
        assert_eq!(strip_code_fences("a ```b``` c"), "a b c");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn test_decode_entities_handles_double_encoding() {
        assert_eq!(decode_entities("&amp;quot;hi&amp;quot;"), "\"hi\"");
        assert_eq!(decode_entities("it&#39;s &lt;ok&gt;"), "it's <ok>");
    }

    #[test]
    fn test_decode_entities_plain_text_unchanged() {
        assert_eq!(decode_entities("Rust & Go"), "Rust & Go");
    }

    #[test]
    fn test_strip_thoughts_removes_whole_lines_any_case() {
        let input = "Thought: I should greet them.\nHello there!\n  THOUGHT: more musing\nWhat role?";
        let output = strip_thoughts(input);
        assert_eq!(output, "Hello there!\nWhat role?");
        assert!(!output.to_lowercase().contains("thought:"));
    }

    #[test]
    fn test_strip_thoughts_removes_inline_fragment() {
        let output = strip_thoughts("Great question. thought: internal note\nNext line");
        assert_eq!(output, "Great question. \nNext line");
    }

    #[test]
    fn test_strip_thoughts_leaves_plain_text() {
        let text = "I thought about your resume: it is strong.";
        assert_eq!(strip_thoughts(text), text);
    }
}
