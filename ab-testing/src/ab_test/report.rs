//! Human-readable reports for a finished run

use std::fmt::Write;

use super::types::{TestResults, Variant, WorkflowState};

fn pct(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

pub fn render_results_summary(results: &TestResults) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "           A/B TESTING RESULTS SUMMARY");
    let _ = writeln!(out, "{}", rule);

    let _ = writeln!(out, "\nWINNER: Variant {}", results.winner);
    let _ = writeln!(out, "Confidence Score: {}", pct(results.confidence_score));
    let _ = writeln!(
        out,
        "Statistical Significance: {}",
        if results.statistical_significance {
            "Yes"
        } else {
            "No"
        }
    );

    let _ = writeln!(out, "\nOVERALL SCORES:");
    let _ = writeln!(out, "   Variant A Average: {}", pct(results.variant_a_average));
    let _ = writeln!(out, "   Variant B Average: {}", pct(results.variant_b_average));

    let _ = writeln!(out, "\nPERSONA ANALYSIS:");
    for (archetype, analysis) in &results.persona_analysis {
        let _ = writeln!(out, "\n   {}:", archetype.display_name());
        let _ = writeln!(out, "     Preferred Variant: {}", analysis.preferred_variant);
        let _ = writeln!(out, "     Variant A Score: {}", pct(analysis.variant_a_score));
        let _ = writeln!(out, "     Variant B Score: {}", pct(analysis.variant_b_score));
        let _ = writeln!(out, "     Difference: {}", pct(analysis.score_difference));
    }

    let _ = writeln!(out, "\nRECOMMENDATIONS:");
    for (i, rec) in results.recommendations.iter().enumerate() {
        let _ = writeln!(out, "   {}. {}", i + 1, rec);
    }

    let _ = writeln!(out, "\n{}", rule);
    out
}

/// Every persona's response to both variants, grouped by persona
pub fn render_detailed_persona_responses(state: &WorkflowState) -> String {
    let rule = "=".repeat(80);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "                    DETAILED PERSONA RESPONSES");
    let _ = writeln!(out, "{}", rule);

    let mut personas: Vec<_> = state.persona_responses.iter().map(|r| r.persona).collect();
    personas.sort();
    personas.dedup();

    for persona in personas {
        let _ = writeln!(out, "\n{}:", persona.display_name());
        let _ = writeln!(out, "{}", "-".repeat(50));

        for variant in Variant::BOTH {
            let Some(record) = state
                .responses_for(variant)
                .find(|r| r.persona == persona)
            else {
                continue;
            };
            let resp = &record.response;

            let _ = writeln!(out, "\n   Variant {}:", variant);
            let _ = writeln!(out, "     Purchase Likelihood: {}", pct(resp.purchase_likelihood));
            let _ = writeln!(out, "     Emotional Response: {}", resp.emotional_response);
            let _ = writeln!(out, "     Reasoning: {}", resp.reasoning);
            let _ = writeln!(out, "     Key Factors: {}", resp.key_factors.join(", "));
            let _ = writeln!(out, "     Budget Consideration: {}", resp.budget_consideration);
        }
    }

    out
}

pub fn print_results_summary(results: &TestResults) {
    print!("{}", render_results_summary(results));
}

pub fn print_detailed_persona_responses(state: &WorkflowState) {
    print!("{}", render_detailed_persona_responses(state));
}
