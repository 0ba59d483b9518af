//! Stage 5: turn the response set into a decision
//!
//! Aggregation never fails. Missing data degrades to zero averages and
//! personas absent from either variant are left out of
//! `persona_analysis` with a warning.

use std::collections::BTreeMap;

use super::types::{PersonaComparison, PersonaResponseRecord, TestResults, Variant, WorkflowState};
use super::workflow::Stage;
use crate::error::{AbTestError, Result};
use crate::personas::{Archetype, PersonaResponse};

/// `confidence_score` must exceed this to be significant
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.1;

/// Per-persona `score_difference` above this earns its own recommendation
pub const STRONG_PREFERENCE_THRESHOLD: f64 = 0.2;

const INCONCLUSIVE: &str =
    "Results are inconclusive - consider testing with different variants or larger sample size";
const SPLIT_PREFERENCE: &str =
    "Different personas prefer different variants - consider targeted campaigns";

/// A only when strictly ahead; ties go to B
fn preferred(a: f64, b: f64) -> Variant {
    if a > b {
        Variant::A
    } else {
        Variant::B
    }
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

fn percent(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

pub fn aggregate(responses: &[PersonaResponseRecord]) -> TestResults {
    let mut by_variant: BTreeMap<Variant, BTreeMap<Archetype, &PersonaResponse>> = BTreeMap::new();
    // First response per (variant, persona) wins
    for record in responses {
        by_variant
            .entry(record.variant)
            .or_default()
            .entry(record.persona)
            .or_insert(&record.response);
    }

    let scores = |variant: Variant| -> Vec<f64> {
        responses
            .iter()
            .filter(|r| r.variant == variant)
            .map(|r| r.response.purchase_likelihood)
            .collect()
    };
    let variant_a_average = mean(&scores(Variant::A));
    let variant_b_average = mean(&scores(Variant::B));

    let empty = BTreeMap::new();
    let a_responses = by_variant.get(&Variant::A).unwrap_or(&empty);
    let b_responses = by_variant.get(&Variant::B).unwrap_or(&empty);

    let mut persona_analysis = BTreeMap::new();
    for archetype in Archetype::ALL {
        match (a_responses.get(&archetype), b_responses.get(&archetype)) {
            (Some(a), Some(b)) => {
                let (a_score, b_score) = (a.purchase_likelihood, b.purchase_likelihood);
                persona_analysis.insert(
                    archetype,
                    PersonaComparison {
                        variant_a_score: a_score,
                        variant_b_score: b_score,
                        preferred_variant: preferred(a_score, b_score),
                        score_difference: (a_score - b_score).abs(),
                        variant_a_reasoning: a.reasoning.clone(),
                        variant_b_reasoning: b.reasoning.clone(),
                    },
                );
            }
            (None, None) => {}
            (a, _) => {
                let missing = if a.is_none() { Variant::A } else { Variant::B };
                tracing::warn!(
                    persona = archetype.as_str(),
                    "no response for variant {}, excluding persona from analysis",
                    missing
                );
            }
        }
    }

    let winner = preferred(variant_a_average, variant_b_average);
    let confidence_score = (variant_a_average - variant_b_average).abs();
    let recommendations = generate_recommendations(winner, confidence_score, &persona_analysis);

    TestResults {
        winner,
        confidence_score,
        variant_a_average,
        variant_b_average,
        persona_analysis,
        recommendations,
        statistical_significance: confidence_score > SIGNIFICANCE_THRESHOLD,
    }
}

/// Ordered: headline, strong per-persona preferences, then split note
pub fn generate_recommendations(
    winner: Variant,
    confidence_score: f64,
    persona_analysis: &BTreeMap<Archetype, PersonaComparison>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if confidence_score <= SIGNIFICANCE_THRESHOLD {
        recommendations.push(INCONCLUSIVE.to_string());
    } else {
        recommendations.push(format!(
            "Variant {} performs better overall with {} higher conversion likelihood",
            winner,
            percent(confidence_score)
        ));
    }

    for (archetype, comparison) in persona_analysis {
        if comparison.score_difference > STRONG_PREFERENCE_THRESHOLD {
            recommendations.push(format!(
                "{} strongly prefers Variant {} (difference: {})",
                archetype.display_name(),
                comparison.preferred_variant,
                percent(comparison.score_difference)
            ));
        }
    }

    let mut preferences = persona_analysis.values().map(|c| c.preferred_variant);
    if let Some(first) = preferences.next() {
        if preferences.any(|p| p != first) {
            recommendations.push(SPLIT_PREFERENCE.to_string());
        }
    }

    recommendations
}

/// Aggregate the collected responses and mark the run complete
pub fn analyze_results(mut state: WorkflowState) -> Result<WorkflowState> {
    if state.organized_responses.is_none() {
        return Err(AbTestError::MissingState {
            stage: Stage::AnalyzeResults.id(),
            field: "organized_responses",
        });
    }

    let results = aggregate(&state.persona_responses);
    tracing::debug!(
        "winner {} with confidence {:.4}",
        results.winner,
        results.confidence_score
    );

    state.test_results = Some(results);
    state.analysis_complete = true;
    Ok(state)
}
