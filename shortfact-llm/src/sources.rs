//! Grounding citation cleanup.

use std::collections::HashSet;

use shortfact_common::Source;

use crate::traits::CitationCandidate;

/// Filter raw grounding citations into a valid, unique source list.
///
/// Candidates missing a `uri` or a `title` (absent or empty) are dropped.
/// First-seen order is preserved; later candidates whose `uri` matches an
/// already-kept one are dropped. Empty input yields empty output.
pub fn dedupe_sources<I>(candidates: I) -> Vec<Source>
where
    I: IntoIterator<Item = CitationCandidate>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for candidate in candidates {
        let uri = match candidate.uri {
            Some(uri) if !uri.is_empty() => uri,
            _ => continue,
        };
        let title = match candidate.title {
            Some(title) if !title.is_empty() => title,
            _ => continue,
        };
        if seen.insert(uri.clone()) {
            out.push(Source { title, uri });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(uri: &str, title: &str) -> CitationCandidate {
        CitationCandidate {
            uri: Some(uri.to_string()),
            title: Some(title.to_string()),
        }
    }

    #[test]
    fn drops_duplicates_and_invalid_entries() {
        let out = dedupe_sources([
            candidate("https://a.com", "A"),
            candidate("https://a.com", "A2"),
            candidate("https://b.com", ""),
        ]);
        assert_eq!(
            out,
            vec![Source {
                title: "A".into(),
                uri: "https://a.com".into()
            }]
        );
    }

    #[test]
    fn preserves_first_seen_order() {
        let out = dedupe_sources([
            candidate("https://c.com", "C"),
            candidate("https://a.com", "A"),
            candidate("https://b.com", "B"),
            candidate("https://a.com", "A again"),
        ]);
        let uris: Vec<&str> = out.iter().map(|s| s.uri.as_str()).collect();
        assert_eq!(uris, ["https://c.com", "https://a.com", "https://b.com"]);
    }

    #[test]
    fn skips_candidates_missing_fields() {
        let out = dedupe_sources([
            CitationCandidate {
                uri: None,
                title: Some("orphan title".into()),
            },
            CitationCandidate {
                uri: Some("https://a.com".into()),
                title: None,
            },
            candidate("https://kept.com", "Kept"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].uri, "https://kept.com");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedupe_sources([]).is_empty());
    }
}
