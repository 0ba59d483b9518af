//! Tests for result aggregation

use super::common::*;
use ab_testing::ab_test::{aggregate, Variant};
use ab_testing::personas::Archetype;

use Archetype::{ElderlyRetiree, SingleMother, YoungMale};

fn score_sets() -> Vec<Vec<(Archetype, f64, f64)>> {
    vec![
        vec![(SingleMother, 0.9, 0.1), (YoungMale, 0.5, 0.6), (ElderlyRetiree, 0.3, 0.3)],
        vec![(SingleMother, 0.2, 0.25), (YoungMale, 0.7, 0.3)],
        vec![(YoungMale, 0.4, 0.4)],
        vec![(SingleMother, 0.0, 1.0), (ElderlyRetiree, 0.55, 0.5)],
        vec![(SingleMother, 0.5, 0.45), (YoungMale, 0.5, 0.45), (ElderlyRetiree, 0.5, 0.45)],
    ]
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_swapping_labels_flips_winner() {
    for scores in score_sets() {
        let records = paired_records(&scores);
        let original = aggregate(&records);
        let swapped = aggregate(&swap_labels(&records));

        if original.variant_a_average == original.variant_b_average {
            assert_eq!(original.winner, Variant::B);
            assert_eq!(swapped.winner, Variant::B);
        } else {
            assert_eq!(swapped.winner, original.winner.other());
        }
        assert!((original.confidence_score - swapped.confidence_score).abs() < 1e-12);
    }
}

#[test]
fn test_significance_tracks_confidence() {
    for scores in score_sets() {
        let results = aggregate(&paired_records(&scores));
        assert_eq!(
            results.statistical_significance,
            results.confidence_score > 0.1
        );
        assert!(results.confidence_score >= 0.0);
        assert!(
            (results.confidence_score - (results.variant_a_average - results.variant_b_average).abs())
                .abs()
                < 1e-12
        );
    }
}

#[test]
fn test_missing_variant_averages_zero() {
    let only_a = vec![
        record(Variant::A, SingleMother, 0.8),
        record(Variant::A, YoungMale, 0.4),
    ];
    let results = aggregate(&only_a);

    assert!((results.variant_a_average - 0.6).abs() < 1e-9);
    assert_eq!(results.variant_b_average, 0.0);
    assert_eq!(results.winner, Variant::A);
    assert!(results.persona_analysis.is_empty());
}

#[test]
fn test_empty_response_set() {
    let results = aggregate(&[]);

    assert_eq!(results.variant_a_average, 0.0);
    assert_eq!(results.variant_b_average, 0.0);
    assert_eq!(results.winner, Variant::B);
    assert!(!results.statistical_significance);
    assert_eq!(results.recommendations.len(), 1);
}

#[test]
fn test_response_order_does_not_matter() {
    let records = paired_records(&score_sets()[0]);
    let mut reversed = records.clone();
    reversed.reverse();

    let a = aggregate(&records);
    let b = aggregate(&reversed);
    assert_eq!(a.winner, b.winner);
    assert_eq!(a.persona_analysis, b.persona_analysis);
    assert_eq!(a.recommendations, b.recommendations);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_identical_scores_are_inconclusive() {
    let results = aggregate(&paired_records(&[
        (SingleMother, 0.5, 0.5),
        (YoungMale, 0.7, 0.7),
        (ElderlyRetiree, 0.3, 0.3),
    ]));

    assert_eq!(results.confidence_score, 0.0);
    assert!(!results.statistical_significance);
    assert_eq!(results.winner, Variant::B);
    assert_eq!(
        results.recommendations[0],
        "Results are inconclusive - consider testing with different variants or larger sample size"
    );
    assert!(results
        .persona_analysis
        .values()
        .all(|c| c.preferred_variant == Variant::B));
}

#[test]
fn test_one_strong_persona_preference() {
    let results = aggregate(&paired_records(&[
        (SingleMother, 0.5, 0.45),
        (YoungMale, 0.75, 0.5),
        (ElderlyRetiree, 0.3, 0.25),
    ]));

    let strong: Vec<&String> = results
        .recommendations
        .iter()
        .filter(|r| r.contains("strongly prefers"))
        .collect();
    assert_eq!(strong.len(), 1);
    assert_eq!(
        strong[0],
        "Young Male strongly prefers Variant A (difference: 25.00%)"
    );
}

#[test]
fn test_split_preferences_add_targeting_note() {
    let results = aggregate(&paired_records(&[
        (SingleMother, 0.9, 0.5),
        (YoungMale, 0.3, 0.6),
    ]));

    assert_eq!(
        results.recommendations.last().unwrap(),
        "Different personas prefer different variants - consider targeted campaigns"
    );
}

#[test]
fn test_comparison_carries_reasoning() {
    let results = aggregate(&paired_records(&[(ElderlyRetiree, 0.4, 0.2)]));
    let comparison = &results.persona_analysis[&ElderlyRetiree];

    assert_eq!(comparison.variant_a_reasoning, "elderly_retiree reasoning for A");
    assert_eq!(comparison.variant_b_reasoning, "elderly_retiree reasoning for B");
    assert!((comparison.score_difference - 0.2).abs() < 1e-9);
}
