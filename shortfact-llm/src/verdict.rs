//! Marker parsing for model replies.
//!
//! The model is instructed to lead with one of three literal markers. The
//! markers form a closed set; anything else falls back to
//! [`Verdict::Inconclusive`] with the reply passed through untouched, so the
//! UI always has something to render.

use shortfact_common::Verdict;

const FACT_MARKER: &str = "FACT:";
const MYTH_MARKER: &str = "MYTH:";
const INCONCLUSIVE_MARKER: &str = "INCONCLUSIVE:";

/// Verdict plus the explanation that accompanied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub verdict: Verdict,
    pub explanation: String,
}

/// Split a raw model reply into a verdict and explanation.
///
/// Matching is literal and case-sensitive against the start of the text; no
/// intent is inferred beyond the three markers. A reply without a marker is
/// not an error.
pub fn parse_reply(text: &str) -> ParsedReply {
    if let Some(rest) = text.strip_prefix(FACT_MARKER) {
        return ParsedReply {
            verdict: Verdict::Fact,
            explanation: rest.trim().to_string(),
        };
    }
    if let Some(rest) = text.strip_prefix(MYTH_MARKER) {
        return ParsedReply {
            verdict: Verdict::Myth,
            explanation: rest.trim().to_string(),
        };
    }
    if let Some(rest) = text.strip_prefix(INCONCLUSIVE_MARKER) {
        return ParsedReply {
            verdict: Verdict::Inconclusive,
            explanation: rest.trim().to_string(),
        };
    }

    // No recognized marker: keep the reply as-is rather than failing.
    ParsedReply {
        verdict: Verdict::Inconclusive,
        explanation: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_marker_yields_fact_with_trimmed_remainder() {
        let parsed = parse_reply(
            "FACT: Water boils at 100°C at sea level due to standard atmospheric pressure.",
        );
        assert_eq!(parsed.verdict, Verdict::Fact);
        assert_eq!(
            parsed.explanation,
            "Water boils at 100°C at sea level due to standard atmospheric pressure."
        );
    }

    #[test]
    fn myth_marker_yields_myth() {
        let parsed = parse_reply("MYTH:  You only use 10% of your brain.");
        assert_eq!(parsed.verdict, Verdict::Myth);
        assert_eq!(parsed.explanation, "You only use 10% of your brain.");
    }

    #[test]
    fn inconclusive_marker_yields_inconclusive() {
        let parsed = parse_reply("INCONCLUSIVE: Evidence is mixed.");
        assert_eq!(parsed.verdict, Verdict::Inconclusive);
        assert_eq!(parsed.explanation, "Evidence is mixed.");
    }

    #[test]
    fn unmarked_text_falls_back_unchanged() {
        let raw = "Some unrelated text with no marker.";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.verdict, Verdict::Inconclusive);
        assert_eq!(parsed.explanation, raw);
    }

    #[test]
    fn marker_must_lead_the_reply() {
        let raw = "The verdict is FACT: definitely.";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.verdict, Verdict::Inconclusive);
        assert_eq!(parsed.explanation, raw);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let raw = "fact: lowercase markers are not recognized.";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.verdict, Verdict::Inconclusive);
        assert_eq!(parsed.explanation, raw);
    }

    #[test]
    fn parsing_is_idempotent() {
        let raw = "MYTH: repeated parsing gives the same answer.";
        assert_eq!(parse_reply(raw), parse_reply(raw));
    }
}
