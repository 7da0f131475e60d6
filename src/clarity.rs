//! # Query Clarity Module
//!
//! ## Purpose
//! Gate that decides whether an officer's query is too vague to search
//! meaningfully. Vague queries short-circuit the pipeline with a fixed
//! advisory message and a small bundle of topical refinement suggestions
//! instead of search results.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query string, arbitrary length; suggestion cap from
//!   the search configuration
//! - **Output**: `Some(Clarification)` for vague queries, `None` otherwise
//! - **Guarantee**: At most `max_suggestions` suggestions, original query
//!   echoed verbatim
//!
//! The vagueness rules and suggestion bundles are deliberate heuristics; the
//! thresholds are part of the observable contract and must not be re-tuned.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Clarification returned instead of search results for vague queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clarification {
    /// Always true; present for API symmetry with the absent case
    pub needs_clarification: bool,
    /// Fixed advisory message shown to the officer
    pub clarification_message: String,
    /// Topical refinement suggestions, capped by configuration
    pub suggested_refinements: Vec<String>,
    /// The query exactly as submitted
    pub original_query: String,
}

const CLARIFICATION_MESSAGE: &str = "Your query seems quite broad. To provide more relevant \
    case law and guidance, could you be more specific about the situation or legal issue \
    you're dealing with?";

/// Single-word legal stopwords that carry no searchable specificity
fn stopword_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(search|arrest|traffic|stop|rights|law|case|legal|searching)$").unwrap()
    })
}

/// Generic-question shape: interrogative followed by a pronoun/actor
fn generic_question_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(what|how|when|why|can|should|may)\s+(i|we|you|police|officer)").unwrap()
    })
}

const VAGUE_KEYWORDS: &[&str] = &[
    "help",
    "info",
    "information",
    "about",
    "general",
    "basic",
    "anything",
    "everything",
    "law",
    "legal",
    "rights",
    "procedure",
];

const GENERAL_LEGAL_TERMS: &[&str] = &[
    "law",
    "legal",
    "case",
    "court",
    "rule",
    "procedure",
    "right",
    "rights",
];

/// Analyze whether a query is too vague to search; returns a clarification
/// with at most `max_suggestions` refinement suggestions when it is.
pub fn classify(query: &str, max_suggestions: usize) -> Option<Clarification> {
    let normalized = query.to_lowercase();
    let normalized = normalized.trim();
    let words: Vec<&str> = normalized.split_whitespace().collect();

    // Degenerate inputs are the common case and are always vague.
    let is_vague = normalized.is_empty()
        || stopword_pattern().is_match(normalized)
        || generic_question_pattern().is_match(normalized)
        || (words.len() <= 2 && words.iter().any(|w| VAGUE_KEYWORDS.contains(w)))
        || (words.len() <= 3
            && words
                .iter()
                .all(|w| w.len() <= 2 || GENERAL_LEGAL_TERMS.contains(w)));

    if !is_vague {
        return None;
    }

    let suggestions = suggestion_bundle(normalized);
    Some(Clarification {
        needs_clarification: true,
        clarification_message: CLARIFICATION_MESSAGE.to_string(),
        suggested_refinements: suggestions
            .iter()
            .take(max_suggestions)
            .map(|s| s.to_string())
            .collect(),
        original_query: query.to_string(),
    })
}

/// Pick the refinement bundle by substring match priority.
fn suggestion_bundle(normalized: &str) -> &'static [&'static str] {
    if normalized.contains("search") {
        &[
            "vehicle search without consent",
            "search incident to arrest",
            "search warrant requirements",
            "consent to search procedures",
        ]
    } else if normalized.contains("traffic") || normalized.contains("stop") {
        &[
            "traffic stop duration limits",
            "vehicle search during traffic stop",
            "passenger rights during traffic stop",
            "DUI investigation procedures",
        ]
    } else if normalized.contains("arrest") {
        &[
            "arrest warrant requirements",
            "warrantless arrest authority",
            "arrest procedures for specific crimes",
            "Miranda rights timing",
        ]
    } else if normalized.contains("rights") {
        &[
            "Miranda rights requirements",
            "Fourth Amendment search rights",
            "suspect's right to counsel",
            "passenger rights during stops",
        ]
    } else {
        &[
            "vehicle search procedures",
            "traffic stop authority",
            "arrest warrant requirements",
            "evidence collection rules",
            "Miranda rights timing",
            "use of force guidelines",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: usize = 4;

    #[test]
    fn single_stopword_is_vague() {
        for word in ["search", "arrest", "traffic", "stop", "rights", "law", "case", "legal"] {
            let clarification = classify(word, CAP).expect(word);
            assert!(clarification.needs_clarification);
            assert!(clarification.suggested_refinements.len() <= CAP);
            assert_eq!(clarification.original_query, word);
        }
    }

    #[test]
    fn empty_and_whitespace_queries_are_vague() {
        assert!(classify("", CAP).is_some());
        assert!(classify("   \t ", CAP).is_some());
    }

    #[test]
    fn generic_question_shape_is_vague() {
        assert!(classify("can I search a vehicle", CAP).is_some());
        assert!(classify("What you need to know", CAP).is_some());
        assert!(classify("how police handle stops", CAP).is_some());
    }

    #[test]
    fn short_vague_keyword_queries_are_vague() {
        for query in ["help", "legal info", "general law", "about rights"] {
            let clarification = classify(query, CAP).expect(query);
            assert!(clarification.suggested_refinements.len() <= CAP);
            assert_eq!(clarification.original_query, query);
        }
    }

    #[test]
    fn short_general_term_queries_are_vague() {
        // Three words, all either general legal terms or two characters or less
        assert!(classify("law of court", CAP).is_some());
        assert!(classify("legal case rule", CAP).is_some());
    }

    #[test]
    fn specific_queries_pass_through() {
        assert!(classify("vehicle search during traffic stop", CAP).is_none());
        assert!(classify("pat down search reasonable suspicion", CAP).is_none());
        assert!(classify("drug dog sniff at lawful traffic stop", CAP).is_none());
    }

    #[test]
    fn suggestion_bundles_follow_substring_priority() {
        // "search" wins even when other topics are present
        let c = classify("search", CAP).unwrap();
        assert_eq!(c.suggested_refinements[0], "vehicle search without consent");

        let c = classify("stop", CAP).unwrap();
        assert_eq!(c.suggested_refinements[0], "traffic stop duration limits");

        let c = classify("arrest", CAP).unwrap();
        assert_eq!(c.suggested_refinements[0], "arrest warrant requirements");

        let c = classify("rights", CAP).unwrap();
        assert_eq!(c.suggested_refinements[0], "Miranda rights requirements");
    }

    #[test]
    fn generic_bundle_truncated_to_cap() {
        let c = classify("help", CAP).unwrap();
        assert_eq!(c.suggested_refinements.len(), CAP);
        assert_eq!(c.suggested_refinements[0], "vehicle search procedures");
        assert_eq!(c.suggested_refinements[3], "evidence collection rules");
    }

    #[test]
    fn configured_cap_is_honored() {
        let c = classify("help", 2).unwrap();
        assert_eq!(
            c.suggested_refinements,
            vec!["vehicle search procedures", "traffic stop authority"]
        );

        let c = classify("search", 1).unwrap();
        assert_eq!(c.suggested_refinements, vec!["vehicle search without consent"]);
    }

    #[test]
    fn case_is_normalized_but_echo_is_verbatim() {
        let c = classify("ARREST", CAP).unwrap();
        assert_eq!(c.original_query, "ARREST");
        assert_eq!(c.suggested_refinements[0], "arrest warrant requirements");
    }
}
