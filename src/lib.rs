//! # Case Law Assistant
//!
//! ## Overview
//! This library implements an assistant service that answers natural-language
//! legal queries from police officers. Relevant precedent cases are retrieved
//! from a fixed in-memory corpus, summarized through a generative-text
//! service, and optionally aggregated into an actionable-guidance report.
//! Every generative step carries a deterministic fallback, so the service
//! always returns populated guidance even when the text service is absent or
//! failing.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `corpus`: The fixed precedent-case corpus, loaded once at startup
//! - `clarity`: Vague-query gate producing refinement suggestions
//! - `ranking`: Keyword relevance scoring against the corpus
//! - `generative`: Generative-text collaborator (Anthropic-style API)
//! - `summary`: Per-case summary extraction with deterministic fallback
//! - `report`: Multi-section actionable report extraction with fallback
//! - `api`: REST API endpoints
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Officer queries (text) with an optional jurisdiction filter
//! - **Output**: Ranked case summaries, clarification prompts, or reports
//! - **Resilience**: Generative failures degrade to template content
//!
//! ## Usage
//! ```rust,no_run
//! use caselaw_assistant::{clarity, ranking, corpus::Corpus, Jurisdiction};
//!
//! let corpus = Corpus::load();
//! let query = "vehicle search during traffic stop";
//! assert!(clarity::classify(query, 4).is_none());
//! let hits = ranking::rank(query, Jurisdiction::Federal, &corpus, 10);
//! println!("Found {} cases", hits.len());
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod corpus;
pub mod clarity;
pub mod ranking;
pub mod generative;
pub mod summary;
pub mod report;
pub mod api;

// Re-exports for convenience
pub use config::Config;
pub use errors::{AssistError, Result};
pub use generative::Generative;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Legal jurisdictions recognized by the corpus and the API filter.
///
/// `All` disables jurisdiction filtering; every other variant narrows the
/// corpus to cases carrying the same tag and contextualizes generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    #[default]
    Federal,
    NewJersey,
    Pennsylvania,
    NewYork,
    All,
}

impl Jurisdiction {
    /// Wire value used in requests, responses, and corpus tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Federal => "federal",
            Jurisdiction::NewJersey => "new_jersey",
            Jurisdiction::Pennsylvania => "pennsylvania",
            Jurisdiction::NewYork => "new_york",
            Jurisdiction::All => "all",
        }
    }

    /// Human-readable label for jurisdiction pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Jurisdiction::Federal => "Federal Courts",
            Jurisdiction::NewJersey => "New Jersey",
            Jurisdiction::Pennsylvania => "Pennsylvania",
            Jurisdiction::NewYork => "New York",
            Jurisdiction::All => "All Jurisdictions",
        }
    }

    /// All filterable values in display order.
    pub fn all_filters() -> [Jurisdiction; 5] {
        [
            Jurisdiction::All,
            Jurisdiction::Federal,
            Jurisdiction::NewJersey,
            Jurisdiction::Pennsylvania,
            Jurisdiction::NewYork,
        ]
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub corpus: Arc<corpus::Corpus>,
    pub generative: generative::Generative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jurisdiction_serde_round_trip() {
        for j in Jurisdiction::all_filters() {
            let wire = serde_json::to_string(&j).unwrap();
            assert_eq!(wire, format!("\"{}\"", j.as_str()));
            let back: Jurisdiction = serde_json::from_str(&wire).unwrap();
            assert_eq!(back, j);
        }
    }

    #[test]
    fn jurisdiction_defaults_to_federal() {
        assert_eq!(Jurisdiction::default(), Jurisdiction::Federal);
    }
}
