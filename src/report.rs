//! # Actionable Report Module
//!
//! ## Purpose
//! Aggregates a set of case summaries into a multi-section actionable-guidance
//! report for the officer. A complete fallback report is always computed
//! first; generative output only replaces sections the parser actually
//! extracts, so every field of the returned report is populated no matter
//! what the text service does.
//!
//! ## Input/Output Specification
//! - **Input**: Officer query, previously obtained case summaries, target
//!   jurisdiction, generative capability
//! - **Output**: `Report` with five always-populated sections and an RFC 3339
//!   generation timestamp
//! - **Parsing**: Section-switch finite-state machine keyed on substring
//!   matches; pipe-delimited insight rows with a bulleted low-fidelity path

use crate::generative::{CompletionRequest, Generative};
use crate::summary::CaseSummary;
use crate::Jurisdiction;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One categorized insight with concrete follow-ups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionableInsight {
    pub category: String,
    pub insight: String,
    pub action_items: Vec<String>,
    pub legal_considerations: Vec<String>,
}

/// The aggregated actionable-guidance report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub query: String,
    pub executive_summary: String,
    pub key_insights: Vec<ActionableInsight>,
    pub procedural_recommendations: Vec<String>,
    pub legal_warnings: Vec<String>,
    pub jurisdiction_specific_notes: Vec<String>,
    pub generated_at: String,
}

/// Parameters for the generative report call
pub struct ReportModel {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&crate::config::GenerativeConfig> for ReportModel {
    fn from(config: &crate::config::GenerativeConfig) -> Self {
        Self {
            model: config.report_model.clone(),
            max_tokens: config.report_max_tokens,
            temperature: config.report_temperature,
        }
    }
}

/// Cap on low-fidelity insights collected from bulleted lines
const MAX_INSIGHTS: usize = 4;

/// Build the actionable report. Never fails: any generative degradation
/// returns the deterministic fallback report, and individually empty sections
/// are backfilled with their fallback content.
pub async fn build_report(
    query: &str,
    cases: &[CaseSummary],
    jurisdiction: Jurisdiction,
    generative: &Generative,
    model: &ReportModel,
) -> Report {
    let response = generative
        .try_complete(CompletionRequest {
            prompt: build_prompt(query, cases, jurisdiction),
            model: model.model.clone(),
            max_tokens: model.max_tokens,
            temperature: model.temperature,
        })
        .await;

    let Some(response) = response else {
        return fallback_report(query);
    };

    let sections = parse_response(&response);

    Report {
        query: query.to_string(),
        executive_summary: if sections.executive_summary.is_empty() {
            fallback_executive_summary(query)
        } else {
            sections.executive_summary
        },
        key_insights: if sections.key_insights.is_empty() {
            fallback_insights()
        } else {
            sections.key_insights
        },
        procedural_recommendations: if sections.procedural_recommendations.is_empty() {
            fallback_recommendations()
        } else {
            sections.procedural_recommendations
        },
        legal_warnings: if sections.legal_warnings.is_empty() {
            fallback_warnings()
        } else {
            sections.legal_warnings
        },
        jurisdiction_specific_notes: if sections.jurisdiction_notes.is_empty() {
            fallback_jurisdiction_notes()
        } else {
            sections.jurisdiction_notes
        },
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// The complete deterministic fallback report
pub fn fallback_report(query: &str) -> Report {
    Report {
        query: query.to_string(),
        executive_summary: fallback_executive_summary(query),
        key_insights: fallback_insights(),
        procedural_recommendations: fallback_recommendations(),
        legal_warnings: fallback_warnings(),
        jurisdiction_specific_notes: fallback_jurisdiction_notes(),
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn fallback_executive_summary(query: &str) -> String {
    format!(
        "Based on available case law, officers should exercise caution and follow \
         established procedures when dealing with situations involving: {}",
        query
    )
}

fn fallback_insights() -> Vec<ActionableInsight> {
    vec![ActionableInsight {
        category: "General Guidance".to_string(),
        insight: "Follow constitutional and department requirements".to_string(),
        action_items: vec![
            "Document all actions".to_string(),
            "Seek supervisor guidance".to_string(),
        ],
        legal_considerations: vec![
            "Ensure legal compliance".to_string(),
            "Avoid constitutional violations".to_string(),
        ],
    }]
}

fn fallback_recommendations() -> Vec<String> {
    vec![
        "Document all observations thoroughly".to_string(),
        "Follow department procedures".to_string(),
        "Consult legal counsel when uncertain".to_string(),
    ]
}

fn fallback_warnings() -> Vec<String> {
    vec![
        "Ensure constitutional compliance".to_string(),
        "Document legal justification for all actions".to_string(),
    ]
}

fn fallback_jurisdiction_notes() -> Vec<String> {
    vec![
        "Verify local laws and regulations".to_string(),
        "Consult department legal resources".to_string(),
    ]
}

fn build_prompt(query: &str, cases: &[CaseSummary], jurisdiction: Jurisdiction) -> String {
    let mut cases_text = String::new();
    for (i, case) in cases.iter().enumerate() {
        cases_text.push_str(&format!(
            "Case {}: {} ({})\n\
             Court: {}\n\
             Year: {}\n\
             Facts: {}\n\
             Legal Principle: {}\n\
             Ruling: {}\n\
             Key Takeaways: {}\n\n",
            i + 1,
            case.case_name,
            case.citation,
            case.court,
            case.year,
            case.facts,
            case.legal_principle,
            case.ruling,
            case.key_takeaways.join(", "),
        ));
    }

    format!(
        "You are a legal expert providing actionable insights to police officers. Based on \
         the officer's query and relevant case law, generate a comprehensive report with \
         practical guidance.\n\
         \n\
         Officer's Query: \"{query}\"\n\
         Target Jurisdiction: {jurisdiction}\n\
         \n\
         Relevant Case Law:\n\
         {cases_text}\n\
         Please provide a structured report with:\n\
         \n\
         1. EXECUTIVE SUMMARY (2-3 sentences summarizing the legal landscape for this query)\n\
         \n\
         2. KEY INSIGHTS (3-4 categorized insights with specific action items):\n\
            - Format: Category | Insight | Action Items | Legal Considerations\n\
         \n\
         3. PROCEDURAL RECOMMENDATIONS (4-6 specific steps officers should follow)\n\
         \n\
         4. LEGAL WARNINGS (Critical legal pitfalls to avoid)\n\
         \n\
         5. JURISDICTION-SPECIFIC NOTES (How {jurisdiction} law may differ from federal \
         precedent)\n\
         \n\
         Focus on:\n\
         - Officer safety and legal compliance\n\
         - Clear, actionable guidance\n\
         - Risk mitigation\n\
         - Documentation requirements\n\
         - When to seek legal counsel\n\
         \n\
         Use professional law enforcement language."
    )
}

/// Parser mode while walking the response line-by-line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before any recognized section heading; content discarded
    Preamble,
    ExecutiveSummary,
    KeyInsights,
    Recommendations,
    Warnings,
    JurisdictionNotes,
}

#[derive(Debug, Default)]
struct Sections {
    executive_summary: String,
    key_insights: Vec<ActionableInsight>,
    procedural_recommendations: Vec<String>,
    legal_warnings: Vec<String>,
    jurisdiction_notes: Vec<String>,
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '•', '*', ' ']).trim()
}

fn is_list_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•') || line.starts_with('*')
}

/// Extract the five report sections from a free-text response.
fn parse_response(response: &str) -> Sections {
    let mut section = Section::Preamble;
    let mut out = Sections::default();
    let mut exec_lines: Vec<String> = Vec::new();

    for raw in response.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if lower.contains("executive summary") {
            section = Section::ExecutiveSummary;
            continue;
        } else if lower.contains("key insights") {
            section = Section::KeyInsights;
            continue;
        } else if lower.contains("procedural recommendations") {
            section = Section::Recommendations;
            continue;
        } else if lower.contains("legal warnings") {
            section = Section::Warnings;
            continue;
        } else if lower.contains("jurisdiction") && lower.contains("notes") {
            section = Section::JurisdictionNotes;
            continue;
        }

        match section {
            Section::Preamble => {}
            Section::ExecutiveSummary => {
                if !line.starts_with('-') && !line.starts_with('•') {
                    exec_lines.push(line.to_string());
                }
            }
            Section::Recommendations => push_bulleted(line, &mut out.procedural_recommendations),
            Section::Warnings => push_bulleted(line, &mut out.legal_warnings),
            Section::JurisdictionNotes => push_bulleted(line, &mut out.jurisdiction_notes),
            Section::KeyInsights => parse_insight_line(line, &mut out.key_insights),
        }
    }

    out.executive_summary = exec_lines.join(" ");
    out
}

fn push_bulleted(line: &str, list: &mut Vec<String>) {
    if is_list_bullet(line) {
        let clean = strip_bullet(line);
        if !clean.is_empty() {
            list.push(clean.to_string());
        }
    }
}

/// A pipe-delimited row becomes a full insight; a bulleted line becomes a
/// low-fidelity "General" insight while fewer than [`MAX_INSIGHTS`] have been
/// collected.
fn parse_insight_line(line: &str, insights: &mut Vec<ActionableInsight>) {
    if line.contains('|') {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() >= 4 {
            let single = |field: &str| {
                if field.is_empty() {
                    Vec::new()
                } else {
                    vec![field.to_string()]
                }
            };
            insights.push(ActionableInsight {
                category: parts[0].to_string(),
                insight: parts[1].to_string(),
                action_items: single(parts[2]),
                legal_considerations: single(parts[3]),
            });
        }
    } else if (line.starts_with('-') || line.starts_with('•')) && insights.len() < MAX_INSIGHTS {
        let clean = strip_bullet(line);
        if !clean.is_empty() {
            insights.push(ActionableInsight {
                category: "General".to_string(),
                insight: clean.to_string(),
                action_items: vec!["Follow department protocols".to_string()],
                legal_considerations: vec!["Consult legal counsel if uncertain".to_string()],
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::generative::TextGenerator;
    use crate::ranking::ScoredCase;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedGenerator(String);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn complete(&self, _request: CompletionRequest) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    fn summaries() -> Vec<CaseSummary> {
        let corpus = crate::corpus::Corpus::load();
        let scored = ScoredCase {
            case: corpus.cases()[0].clone(),
            score: 4,
        };
        vec![CaseSummary {
            case_name: scored.case.case_name.clone(),
            citation: scored.case.citation.clone(),
            year: scored.case.year,
            court: scored.case.court.clone(),
            summary: crate::summary::fallback_summary(&scored.case),
            key_takeaways: crate::summary::fallback_takeaways(),
            facts: scored.case.facts.clone(),
            legal_principle: scored.case.legal_principle.clone(),
            ruling: scored.case.ruling.clone(),
            relevance_score: scored.score,
            full_text_link: crate::summary::scholar_link(&scored.case.citation),
            jurisdiction: scored.case.jurisdiction,
        }]
    }

    fn model() -> ReportModel {
        ReportModel {
            model: "test-model".to_string(),
            max_tokens: 200,
            temperature: 0.2,
        }
    }

    #[tokio::test]
    async fn unavailable_service_yields_fixed_fallback_shape() {
        let report = build_report(
            "vehicle search during traffic stop",
            &summaries(),
            Jurisdiction::Federal,
            &Generative::Unavailable,
            &model(),
        )
        .await;

        assert_eq!(report.key_insights.len(), 1);
        assert_eq!(report.key_insights[0].category, "General Guidance");
        assert_eq!(report.procedural_recommendations.len(), 3);
        assert_eq!(report.legal_warnings.len(), 2);
        assert_eq!(report.jurisdiction_specific_notes.len(), 2);
        assert!(report
            .executive_summary
            .ends_with("vehicle search during traffic stop"));
        // RFC 3339 timestamp parses back
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }

    #[tokio::test]
    async fn well_formed_five_section_response_round_trips() {
        let response = "\
            EXECUTIVE SUMMARY\n\
            Vehicle searches during stops are governed by the automobile exception.\n\
            \n\
            KEY INSIGHTS\n\
            Search Authority | Probable cause unlocks the automobile exception | Establish probable cause first | Suppression risk without it\n\
            Officer Safety | Drivers may be ordered out of the vehicle | Use Mimms authority during stops | Must remain within stop scope\n\
            Documentation | Courts weigh contemporaneous reports heavily | Record observations at the scene | Late reports invite challenges\n\
            \n\
            PROCEDURAL RECOMMENDATIONS\n\
            - Establish and articulate probable cause before searching\n\
            - Order occupants out only as permitted\n\
            - Record the basis for every search decision\n\
            - Request a supervisor for contested searches\n\
            \n\
            LEGAL WARNINGS\n\
            - Searches without probable cause risk suppression\n\
            - Prolonging a stop beyond its mission violates the Fourth Amendment\n\
            \n\
            JURISDICTION-SPECIFIC NOTES\n\
            - State constitutions may impose stricter limits\n\
            - Review current state supreme court guidance\n";

        let generative = Generative::enabled(Arc::new(FixedGenerator(response.to_string())));
        let report = build_report(
            "vehicle search",
            &summaries(),
            Jurisdiction::Federal,
            &generative,
            &model(),
        )
        .await;

        assert_eq!(
            report.executive_summary,
            "Vehicle searches during stops are governed by the automobile exception."
        );
        assert_eq!(report.key_insights.len(), 3);
        assert_eq!(report.key_insights[0].category, "Search Authority");
        assert_eq!(
            report.key_insights[0].action_items,
            vec!["Establish probable cause first"]
        );
        assert_eq!(
            report.key_insights[2].legal_considerations,
            vec!["Late reports invite challenges"]
        );
        assert_eq!(report.procedural_recommendations.len(), 4);
        assert_eq!(report.legal_warnings.len(), 2);
        assert_eq!(report.jurisdiction_specific_notes.len(), 2);
    }

    #[tokio::test]
    async fn empty_sections_backfill_individually() {
        // Only an executive summary: the other four sections use fallbacks.
        let response = "Executive Summary\nOfficers have settled authority here.\n";
        let generative = Generative::enabled(Arc::new(FixedGenerator(response.to_string())));
        let report = build_report(
            "traffic stop",
            &summaries(),
            Jurisdiction::Federal,
            &generative,
            &model(),
        )
        .await;

        assert_eq!(report.executive_summary, "Officers have settled authority here.");
        assert_eq!(report.key_insights, fallback_insights());
        assert_eq!(report.procedural_recommendations.len(), 3);
        assert_eq!(report.legal_warnings.len(), 2);
        assert_eq!(report.jurisdiction_specific_notes.len(), 2);
    }

    #[test]
    fn short_pipe_rows_are_dropped() {
        let mut insights = Vec::new();
        parse_insight_line("Category | Insight only", &mut insights);
        assert!(insights.is_empty());
    }

    #[test]
    fn blank_pipe_fields_become_empty_lists() {
        let mut insights = Vec::new();
        parse_insight_line("Safety | Stay alert | | Liability exposure", &mut insights);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].action_items.is_empty());
        assert_eq!(insights[0].legal_considerations, vec!["Liability exposure"]);
    }

    #[test]
    fn low_fidelity_insights_cap_at_four() {
        let mut insights = Vec::new();
        for i in 0..6 {
            parse_insight_line(&format!("- point {}", i), &mut insights);
        }
        assert_eq!(insights.len(), 4);
        assert!(insights.iter().all(|i| i.category == "General"));
        assert_eq!(
            insights[0].action_items,
            vec!["Follow department protocols"]
        );
    }

    #[test]
    fn star_bullets_do_not_create_low_fidelity_insights() {
        let mut insights = Vec::new();
        parse_insight_line("* starred point", &mut insights);
        assert!(insights.is_empty());
    }

    #[test]
    fn section_headings_are_matched_case_insensitively() {
        let sections = parse_response(
            "3. Procedural Recommendations:\n- Step one\nLegal Warnings\n- Warning one\n",
        );
        assert_eq!(sections.procedural_recommendations, vec!["Step one"]);
        assert_eq!(sections.legal_warnings, vec!["Warning one"]);
    }
}
