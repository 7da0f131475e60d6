//! # Case Summary Module
//!
//! ## Purpose
//! Turns one scored case plus a generative-text response into a structured
//! per-case summary for the officer. A deterministic template summary and a
//! fixed takeaway list are always computed first, so any generative failure or
//! unparseable response degrades to complete, useful content.
//!
//! ## Input/Output Specification
//! - **Input**: Scored case, officer query, target jurisdiction, generative
//!   capability
//! - **Output**: `CaseSummary` with non-empty summary and takeaways, always
//! - **Parsing**: Line-oriented finite-state machine over the free-text
//!   response; misses fall back field-by-field

use crate::generative::{CompletionRequest, Generative};
use crate::ranking::ScoredCase;
use crate::Jurisdiction;
use serde::{Deserialize, Serialize};

/// Structured summary of one case, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case_name: String,
    pub citation: String,
    pub year: u16,
    pub court: String,
    pub summary: String,
    pub key_takeaways: Vec<String>,
    pub facts: String,
    pub legal_principle: String,
    pub ruling: String,
    pub relevance_score: u32,
    // Optional on the wire: report requests may replay summaries that were
    // stored without a link or jurisdiction.
    #[serde(default)]
    pub full_text_link: String,
    #[serde(default)]
    pub jurisdiction: Jurisdiction,
}

/// Officer-guidance takeaways used whenever extraction yields none
const FALLBACK_TAKEAWAYS: [&str; 4] = [
    "Review specific facts and circumstances of your situation",
    "Consider consulting department legal counsel for complex situations",
    "Document all observations and justifications clearly in reports",
    "Follow department policies and procedures",
];

/// Parameters for the generative summary call
pub struct SummaryModel {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&crate::config::GenerativeConfig> for SummaryModel {
    fn from(config: &crate::config::GenerativeConfig) -> Self {
        Self {
            model: config.summary_model.clone(),
            max_tokens: config.summary_max_tokens,
            temperature: config.summary_temperature,
        }
    }
}

/// Summarize one case for the officer's query. Never fails: any generative
/// degradation returns the deterministic template content.
pub async fn summarize(
    scored: &ScoredCase,
    query: &str,
    jurisdiction: Jurisdiction,
    generative: &Generative,
    model: &SummaryModel,
) -> CaseSummary {
    let case = &scored.case;
    let fallback_summary = fallback_summary(case);

    let (summary, takeaways) = match generative
        .try_complete(CompletionRequest {
            prompt: build_prompt(scored, query, jurisdiction),
            model: model.model.clone(),
            max_tokens: model.max_tokens,
            temperature: model.temperature,
        })
        .await
    {
        Some(response) => {
            let extracted = parse_response(&response);
            // Summary and takeaways fall back independently
            let summary = if extracted.summary.is_empty() {
                fallback_summary
            } else {
                extracted.summary
            };
            let takeaways = if extracted.takeaways.is_empty() {
                fallback_takeaways()
            } else {
                extracted.takeaways
            };
            (summary, takeaways)
        }
        None => (fallback_summary, fallback_takeaways()),
    };

    CaseSummary {
        case_name: case.case_name.clone(),
        citation: case.citation.clone(),
        year: case.year,
        court: case.court.clone(),
        summary,
        key_takeaways: takeaways,
        facts: case.facts.clone(),
        legal_principle: case.legal_principle.clone(),
        ruling: case.ruling.clone(),
        relevance_score: scored.score,
        full_text_link: scholar_link(&case.citation),
        jurisdiction: case.jurisdiction,
    }
}

/// Deterministic template summary for a case
pub fn fallback_summary(case: &crate::corpus::CaseRecord) -> String {
    format!(
        "In {}, the {} addressed {}. The court ruled that {}.",
        case.case_name,
        case.court,
        case.legal_principle.to_lowercase(),
        case.ruling.to_lowercase()
    )
}

/// Fixed fallback takeaway list
pub fn fallback_takeaways() -> Vec<String> {
    FALLBACK_TAKEAWAYS.iter().map(|t| t.to_string()).collect()
}

/// External reference link for the citation (Google Scholar query)
pub fn scholar_link(citation: &str) -> String {
    format!(
        "https://scholar.google.com/scholar_case?q={}",
        citation.replace(' ', "+")
    )
}

fn build_prompt(scored: &ScoredCase, query: &str, jurisdiction: Jurisdiction) -> String {
    let case = &scored.case;
    format!(
        "You are a legal AI assistant helping police officers understand case law.\n\
         \n\
         Case Information:\n\
         - Case Name: {}\n\
         - Citation: {}\n\
         - Year: {}\n\
         - Court: {}\n\
         - Facts: {}\n\
         - Legal Principle: {}\n\
         - Ruling: {}\n\
         - Jurisdiction: {}\n\
         \n\
         Officer's Query: \"{}\"\n\
         Target Jurisdiction: {}\n\
         \n\
         Please provide:\n\
         1. A clear, concise summary (2-3 sentences) of how this case relates to the officer's query\n\
         2. 4-6 specific, actionable key takeaways for police officers\n\
         \n\
         Focus on practical application and officer safety. Make the language clear and professional.",
        case.case_name,
        case.citation,
        case.year,
        case.court,
        case.facts,
        case.legal_principle,
        case.ruling,
        case.jurisdiction,
        query,
        jurisdiction,
    )
}

/// Parser mode while walking the response line-by-line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Before any recognized section marker; content discarded
    Preamble,
    /// Accumulating summary prose
    Summary,
    /// Accumulating bulleted takeaways
    Takeaways,
}

#[derive(Debug, Default)]
struct Extracted {
    summary: String,
    takeaways: Vec<String>,
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•')
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '•', '*', ' ']).trim()
}

/// Extract summary text and takeaways from a free-text response.
///
/// Section switches: a line containing "summary" or starting with "1." enters
/// summary mode (a "1." line contributes its remainder); a line containing
/// "takeaway" or "key points" or starting with "2." enters takeaways mode.
fn parse_response(response: &str) -> Extracted {
    let mut state = ParseState::Preamble;
    let mut summary_lines: Vec<String> = Vec::new();
    let mut takeaways: Vec<String> = Vec::new();

    for raw in response.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if lower.contains("summary") || line.starts_with("1.") {
            state = ParseState::Summary;
            if let Some(rest) = line.strip_prefix("1.") {
                let rest = rest.trim();
                if !rest.is_empty() {
                    summary_lines.push(rest.to_string());
                }
            }
            continue;
        }
        if lower.contains("takeaway") || lower.contains("key points") || line.starts_with("2.") {
            state = ParseState::Takeaways;
            continue;
        }

        match state {
            ParseState::Preamble => {}
            ParseState::Summary => {
                if !is_bullet(line) {
                    summary_lines.push(line.to_string());
                }
            }
            ParseState::Takeaways => {
                if line.starts_with('-') || line.starts_with('•') || line.starts_with('*') {
                    let takeaway = strip_bullet(line);
                    if !takeaway.is_empty() {
                        takeaways.push(takeaway.to_string());
                    }
                }
            }
        }
    }

    Extracted {
        summary: summary_lines.join(" "),
        takeaways,
    }
}
