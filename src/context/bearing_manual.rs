//! Built-in bearing maintenance snippets
//!
//! Used when no plant manual is configured. Ranking is keyword overlap, the
//! same scoring `ManualIndex` applies to a loaded manual.

use std::collections::HashSet;
use std::sync::OnceLock;

use super::tokenize;

/// Manual snippet with search keywords
#[derive(Debug, Clone)]
pub struct Snippet {
    pub id: usize,
    pub content: &'static str,
    pub keywords: &'static [&'static str],
}

static SNIPPETS: OnceLock<Vec<Snippet>> = OnceLock::new();

fn snippets() -> &'static [Snippet] {
    SNIPPETS.get_or_init(|| {
        vec![
            Snippet {
                id: 1,
                content: "Overall RMS velocity below the alert level indicates normal running. \
                          Continue routine condition monitoring at the standard interval.",
                keywords: &["normal", "rms", "routine", "monitoring", "stable"],
            },
            Snippet {
                id: 2,
                content: "When RMS rises into the alert band, shorten the monitoring interval, \
                          check lubricant condition and plan preventive maintenance at the next \
                          scheduled stop.",
                keywords: &["warning", "rms", "alert", "preventive", "lubrication", "interval"],
            },
            Snippet {
                id: 3,
                content: "Kurtosis above 5 indicates impulsive shock content from a localized \
                          defect such as a spall or crack on a raceway or rolling element, often \
                          before overall RMS increases.",
                keywords: &["kurtosis", "impulsive", "shock", "crack", "spall", "defect", "failure"],
            },
            Snippet {
                id: 4,
                content: "RMS above the danger level with rising kurtosis means advanced bearing \
                          damage. Stop the machine at the earliest safe opportunity and replace \
                          the bearing.",
                keywords: &["failure", "rms", "kurtosis", "danger", "replace", "stop", "urgent"],
            },
            Snippet {
                id: 5,
                content: "Insufficient or degraded grease raises friction and broadband vibration. \
                          Relubricate with the specified grease quantity and recheck vibration \
                          after 24 hours of running.",
                keywords: &["lubrication", "grease", "warning", "rms", "friction", "relubricate"],
            },
            Snippet {
                id: 6,
                content: "Bearing replacement: lock out the drive, remove the coupling, withdraw \
                          the bearing with a puller, inspect the shaft seat and housing bore, fit \
                          the new bearing by induction heating, never by hammering.",
                keywords: &["replacement", "replace", "failure", "puller", "shaft", "housing", "parts"],
            },
            Snippet {
                id: 7,
                content: "Recommended spares for a rolling bearing replacement: bearing of the \
                          same designation, seals or V-rings, lock nut and washer, and the \
                          specified grease.",
                keywords: &["parts", "spares", "seal", "replacement", "failure", "grease"],
            },
            Snippet {
                id: 8,
                content: "Misalignment and looseness raise RMS without a matching rise in \
                          kurtosis. Verify alignment and foundation bolt torque before \
                          condemning the bearing.",
                keywords: &["misalignment", "looseness", "rms", "warning", "alignment", "torque"],
            },
        ]
    })
}

/// Search the built-in snippets
///
/// Returns at most `max_results` snippets sorted by relevance; snippets
/// that match nothing are dropped.
pub fn search_with_limit(query: &str, max_results: usize) -> Vec<String> {
    let query_terms = tokenize(query);
    if query_terms.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Snippet)> = snippets()
        .iter()
        .map(|snippet| (relevance_score(&query_terms, snippet), snippet))
        .filter(|(score, _)| *score > 0)
        .collect();

    // Stable sort keeps snippet order on ties
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(max_results)
        .map(|(_, snippet)| snippet.content.to_string())
        .collect()
}

/// Keyword hits weigh 2, plain content hits 1
fn relevance_score(query_terms: &[String], snippet: &Snippet) -> usize {
    let content_words: HashSet<String> = tokenize(snippet.content).into_iter().collect();
    query_terms
        .iter()
        .map(|term| {
            let keyword = if snippet.keywords.contains(&term.as_str()) { 2 } else { 0 };
            keyword + usize::from(content_words.contains(term))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_query_prefers_replacement_guidance() {
        let results = search_with_limit("State: Failure, RMS: 0.612, Kurtosis: 7.400", 1);
        assert_eq!(results.len(), 1);
        assert!(results[0].contains("replace the bearing"));
    }

    #[test]
    fn test_warning_query() {
        let results = search_with_limit("State: Warning, RMS: 0.300, Kurtosis: 3.100", 3);
        assert_eq!(results.len(), 3);
        assert!(results.iter().any(|r| r.contains("preventive maintenance")));
    }

    #[test]
    fn test_empty_query() {
        assert!(search_with_limit("", 5).is_empty());
    }

    #[test]
    fn test_unrelated_query() {
        assert!(search_with_limit("xyzzy", 5).is_empty());
    }

    #[test]
    fn test_snippet_ids_unique() {
        let ids: HashSet<usize> = snippets().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), snippets().len());
    }
}
