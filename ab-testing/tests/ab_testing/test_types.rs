//! Tests for state and result types

use super::common::*;
use ab_testing::ab_test::{TestResults, Variant, VariantInfo, WorkflowState};
use ab_testing::error::AbTestError;
use ab_testing::personas::{Archetype, PersonaResponse, ProductInfo};

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_persona_response_json_shape() {
    let response = record(Variant::A, Archetype::SingleMother, 0.7).response;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["persona_type"], "single_mother");
    assert_eq!(json["purchase_likelihood"], 0.7);
    for field in ["reasoning", "key_factors", "emotional_response", "budget_consideration"] {
        assert!(json.get(field).is_some(), "missing {}", field);
    }

    let back: PersonaResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_response_record_json_shape() {
    let json = serde_json::to_value(record(Variant::B, Archetype::YoungMale, 0.4)).unwrap();

    assert_eq!(json["variant"], "B");
    assert_eq!(json["persona"], "young_male");
    assert_eq!(json["response"]["persona_type"], "young_male");
}

#[test]
fn test_test_results_json_shape() {
    let results = ab_testing::ab_test::aggregate(&paired_records(&[(
        Archetype::ElderlyRetiree,
        0.6,
        0.2,
    )]));
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json["winner"], "A");
    assert_eq!(json["statistical_significance"], true);
    let analysis = &json["persona_analysis"]["elderly_retiree"];
    assert_eq!(analysis["preferred_variant"], "A");
    assert!(analysis.get("variant_a_reasoning").is_some());
    assert!(analysis.get("score_difference").is_some());

    let back: TestResults = serde_json::from_value(json).unwrap();
    assert_eq!(back.winner, results.winner);
    assert_eq!(back.recommendations, results.recommendations);
}

#[test]
fn test_product_info_defaults_missing_fields() {
    let product: ProductInfo = serde_json::from_str("{}").unwrap();
    assert_eq!(product, ProductInfo::new("", 0.0));

    let product: ProductInfo = serde_json::from_str(r#"{"category": "home"}"#).unwrap();
    assert_eq!(product.price, 0.0);
}

#[test]
fn test_fresh_state_is_empty() {
    let state = initial_state(None, VariantInfo::default(), VariantInfo::default());

    assert!(state.image_description.is_empty());
    assert!(state.persona_responses.is_empty());
    assert_eq!(state.current_variant, None);
    assert_eq!(state.test_results, None);
    assert!(!state.analysis_complete);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validation_accepts_minimal_state() {
    let state = initial_state(None, VariantInfo::new("A", ""), VariantInfo::new("B", ""));
    assert!(state.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_prices() {
    for price in [-1.0, f64::INFINITY, f64::NAN] {
        let state = initial_state(
            Some(ProductInfo::new("home", price)),
            VariantInfo::default(),
            VariantInfo::default(),
        );
        assert!(matches!(state.validate(), Err(AbTestError::InvalidInput(_))));
    }

    let state = initial_state(
        None,
        VariantInfo::default().with_price(-0.01),
        VariantInfo::default(),
    );
    let err = state.validate().unwrap_err();
    assert!(err.to_string().contains("variant_a_info.price"));
}

#[test]
fn test_validation_rejects_empty_url() {
    let state = WorkflowState::new("", None, VariantInfo::default(), VariantInfo::default());
    assert!(matches!(state.validate(), Err(AbTestError::InvalidInput(_))));
}

#[test]
fn test_unknown_persona_key() {
    let err = "teenager".parse::<Archetype>().unwrap_err();
    assert!(matches!(err, AbTestError::UnknownPersona(ref key) if key == "teenager"));
    assert_eq!(" Young_Male ".parse::<Archetype>().unwrap(), Archetype::YoungMale);
}
