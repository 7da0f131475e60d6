//! # Relevance Ranking Module
//!
//! ## Purpose
//! Scores and filters the fixed case corpus against an officer's query and a
//! jurisdiction filter. This is heuristic triage, not a search engine: scoring
//! is substring-based and intentionally over-matches ("stop" matches
//! "stopped"), with the downstream summarizer absorbing the imprecision.
//!
//! ## Input/Output Specification
//! - **Input**: Query text, jurisdiction filter, the corpus, result cap
//! - **Output**: Cases with score >= 1, sorted non-increasing by score
//! - **Determinism**: Stable sort preserves corpus order on score ties
//!
//! ## Scoring
//! - +2 for every corpus keyword appearing as a substring of the query
//! - +1 if any query token appears in the case name
//! - +1 if any query token appears in the facts
//! - +1 if any query token appears in the legal principle
//!
//! The weights are ad hoc and part of the observable contract; do not re-tune.

use crate::corpus::{CaseRecord, Corpus};
use crate::Jurisdiction;

/// A corpus case paired with its computed relevance score
#[derive(Debug, Clone)]
pub struct ScoredCase {
    pub case: CaseRecord,
    pub score: u32,
}

/// Rank corpus cases against a query, keeping at most `max_results`.
pub fn rank(
    query: &str,
    jurisdiction: Jurisdiction,
    corpus: &Corpus,
    max_results: usize,
) -> Vec<ScoredCase> {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();

    let mut scored: Vec<ScoredCase> = corpus
        .cases()
        .iter()
        .filter(|case| jurisdiction == Jurisdiction::All || case.jurisdiction == jurisdiction)
        .filter_map(|case| {
            let score = score_case(case, &query_lower, &tokens);
            (score > 0).then(|| ScoredCase {
                case: case.clone(),
                score,
            })
        })
        .collect();

    // Stable: equal scores keep corpus order
    scored.sort_by_key(|s| std::cmp::Reverse(s.score));
    scored.truncate(max_results);
    scored
}

fn score_case(case: &CaseRecord, query_lower: &str, tokens: &[&str]) -> u32 {
    let mut score = 0;

    for keyword in &case.keywords {
        if query_lower.contains(keyword.as_str()) {
            score += 2;
        }
    }

    let name_lower = case.case_name.to_lowercase();
    if tokens.iter().any(|t| name_lower.contains(t)) {
        score += 1;
    }

    let facts_lower = case.facts.to_lowercase();
    if tokens.iter().any(|t| facts_lower.contains(t)) {
        score += 1;
    }

    let principle_lower = case.legal_principle.to_lowercase();
    if tokens.iter().any(|t| principle_lower.contains(t)) {
        score += 1;
    }

    score
}
