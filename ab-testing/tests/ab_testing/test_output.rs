//! Tests for results artifacts and variant files

use super::common::*;

use ab_testing::ab_test::{
    load_results, load_variants, save_results, save_results_as, VariantInfo,
};
use ab_testing::personas::ProductInfo;

async fn finished_state() -> ab_testing::ab_test::WorkflowState {
    static_workflow("A desk lamp")
        .run(initial_state(
            Some(ProductInfo::new("home", 24.99)),
            VariantInfo::new("Warm", "Easy to use, reliable light")
                .with_field("call_to_action", "Light Up Tonight"),
            VariantInfo::new("Tech", "Advanced high-tech lamp").with_price(64.99),
        ))
        .await
        .unwrap()
}

// ============================================================================
// Results Artifact Tests
// ============================================================================

#[tokio::test]
async fn test_save_results_writes_top_level_fields() {
    let dir = create_temp_dir("save_results");
    let state = finished_state().await;

    let path = save_results(&state, &dir).await.unwrap();
    let filename = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(filename.starts_with("ab_test_results_"));
    assert!(filename.ends_with(".json"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json["run_id"].is_string());
    assert!(json["completed_at"].is_string());
    assert_eq!(json["persona_responses"].as_array().unwrap().len(), 6);
    assert_eq!(json["persona_responses"][0]["variant"], "A");
    assert!(json["persona_responses"][0]["response"]["purchase_likelihood"].is_number());
    assert!(json["test_results"]["winner"].is_string());
    assert!(json["test_results"]["persona_analysis"]["single_mother"].is_object());
    assert_eq!(json["variant_a_info"]["call_to_action"], "Light Up Tonight");
    assert_eq!(json["analysis_complete"], true);

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_same_label_never_overwrites() {
    let dir = create_temp_dir("same_label");
    let state = finished_state().await;

    let mut paths = Vec::new();
    for label in ["Lamp", "Lamp", "lamp!"] {
        paths.push(save_results_as(&state, &dir, Some(label)).await.unwrap());
    }

    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 3);
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 3);
    for path in &paths {
        load_results(path).await.unwrap();
    }

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_load_results_reads_artifact_back() {
    let dir = create_temp_dir("load_results");
    let state = finished_state().await;

    let path = save_results_as(&state, &dir, Some("Desk Lamp")).await.unwrap();
    assert!(path
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("ab_test_results_desk_lamp_"));

    let artifact = load_results(&path).await.unwrap();
    assert_eq!(artifact.state.persona_responses.len(), 6);
    assert_eq!(artifact.state.variant_b_info.price, Some(64.99));
    assert_eq!(
        artifact.state.test_results.as_ref().map(|r| r.winner),
        state.test_results.as_ref().map(|r| r.winner)
    );
    assert!(artifact.state.analysis_complete);

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_save_creates_missing_directory() {
    let root = create_temp_dir("nested_output");
    let dir = root.join("a").join("b");
    let state = finished_state().await;

    let path = save_results(&state, &dir).await.unwrap();
    assert!(path.exists());

    cleanup_temp_dir(&root);
}

#[tokio::test]
async fn test_load_results_missing_file() {
    let missing = std::env::temp_dir().join("ab_testing_test_no_such_file.json");
    assert!(load_results(&missing).await.is_err());
}

// ============================================================================
// Variants File Tests
// ============================================================================

#[tokio::test]
async fn test_load_variants_yaml_fixture() {
    let variants = load_variants(&fixture("sample_variants.yaml")).await.unwrap();

    assert_eq!(variants.variant_a.name, "Feature-Focused");
    assert_eq!(variants.variant_a.price, Some(99.99));
    assert_eq!(variants.variant_a.category.as_deref(), Some("electronics"));
    assert_eq!(variants.variant_b.extra["marketing_angle"], "lifestyle_benefits");
}

#[tokio::test]
async fn test_load_variants_json() {
    let dir = create_temp_dir("variants_json");
    let path = dir.join("variants.json");
    std::fs::write(
        &path,
        r#"{
            "variant_a": {"name": "Short", "description": "Quick and simple"},
            "variant_b": {"name": "Long", "description": "Premium", "price": 80}
        }"#,
    )
    .unwrap();

    let variants = load_variants(&path).await.unwrap();
    assert_eq!(variants.variant_a.name, "Short");
    assert_eq!(variants.variant_b.price, Some(80.0));

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_load_variants_rejects_malformed_file() {
    let dir = create_temp_dir("variants_bad");
    let path = dir.join("variants.yaml");
    std::fs::write(&path, "variant_a: [not, a, mapping]\n").unwrap();

    assert!(load_variants(&path).await.is_err());

    cleanup_temp_dir(&dir);
}
