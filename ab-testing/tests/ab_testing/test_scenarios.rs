//! Tests for batch scenario runs

use super::common::*;
use std::sync::Arc;

use ab_testing::ab_test::{
    load_results, load_scenarios, run_scenarios, BatchOptions, Scenario, VariantInfo,
    WorkflowConfig,
};
use ab_testing::error::AbTestError;
use ab_testing::personas::{default_personas, ProductInfo};
use ab_testing_sdk::WorkflowStatus;

fn options(batch_size: usize) -> BatchOptions {
    BatchOptions {
        batch_size,
        output_dir: None,
        workflow: WorkflowConfig::default(),
        personas: default_personas(),
    }
}

fn scenario(name: &str, price: f64) -> Scenario {
    Scenario {
        name: name.to_string(),
        image_url: IMAGE_URL.to_string(),
        image_description: Some(format!("{} on a table", name)),
        product_info: Some(ProductInfo::new("home", price)),
        variant_a: VariantInfo::new("A", "Durable and simple"),
        variant_b: VariantInfo::new("B", "Advanced"),
    }
}

#[tokio::test]
async fn test_load_scenarios_fixture() {
    let scenarios = load_scenarios(&fixture("sample_scenarios.yaml")).await.unwrap();

    let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Baby Products", "Luxury Watch", "Health Supplement"]);
    assert_eq!(scenarios[1].product_info, Some(ProductInfo::new("luxury", 299.99)));
    assert_eq!(scenarios[2].variant_b.price, Some(47.99));
}

#[tokio::test]
async fn test_empty_scenario_file_is_rejected() {
    let dir = create_temp_dir("empty_scenarios");
    let path = dir.join("scenarios.yaml");
    std::fs::write(&path, "scenarios: []\n").unwrap();

    assert!(matches!(
        load_scenarios(&path).await,
        Err(AbTestError::InvalidInput(_))
    ));

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_fixture_scenarios_run_offline() {
    let scenarios = load_scenarios(&fixture("sample_scenarios.yaml")).await.unwrap();
    // Every fixture scenario carries a description, so the describer is never called
    let outcomes = run_scenarios(scenarios, Arc::new(FailingDescriber), options(2))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].name, "Baby Products");
    for outcome in &outcomes {
        assert_eq!(outcome.status, WorkflowStatus::Completed, "{:?}", outcome.error);
        let results = outcome.results.as_ref().unwrap();
        assert_eq!(results.persona_analysis.len(), 3);
        assert!(outcome.artifact.is_none());
    }
}

#[tokio::test]
async fn test_failed_scenario_does_not_stop_batch() {
    let scenarios = vec![
        scenario("Lamp", 20.0),
        scenario("Broken", -1.0),
        scenario("Rug", 45.0),
    ];

    let outcomes = run_scenarios(scenarios, Arc::new(FailingDescriber), options(3))
        .await
        .unwrap();

    let statuses: Vec<WorkflowStatus> = outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![
            WorkflowStatus::Completed,
            WorkflowStatus::Failed,
            WorkflowStatus::Completed
        ]
    );
    assert!(outcomes[1]
        .error
        .as_deref()
        .unwrap()
        .contains("product_info.price"));
    assert!(outcomes[1].results.is_none());
}

#[tokio::test]
async fn test_scenarios_without_description_use_shared_describer() {
    let mut s = scenario("Kettle", 20.0);
    s.image_description = None;

    let outcomes = run_scenarios(vec![s], Arc::new(FailingDescriber), options(1))
        .await
        .unwrap();

    // The describer fails, so the run completes on fallback content
    assert_eq!(outcomes[0].status, WorkflowStatus::Completed);
}

#[tokio::test]
async fn test_batch_saves_one_artifact_per_scenario() {
    let dir = create_temp_dir("batch_artifacts");
    let mut opts = options(2);
    opts.output_dir = Some(dir.clone());

    let outcomes = run_scenarios(
        vec![scenario("Lamp", 20.0), scenario("Rug", 45.0)],
        Arc::new(FailingDescriber),
        opts,
    )
    .await
    .unwrap();

    let paths: Vec<_> = outcomes
        .iter()
        .map(|o| o.artifact.clone().unwrap())
        .collect();
    assert_ne!(paths[0], paths[1]);
    assert!(paths.iter().all(|p| p.exists()));

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_same_named_scenarios_keep_separate_artifacts() {
    let dir = create_temp_dir("batch_same_name");
    let mut opts = options(2);
    opts.output_dir = Some(dir.clone());

    let outcomes = run_scenarios(
        vec![scenario("Lamp", 20.0), scenario("Lamp", 900.0)],
        Arc::new(FailingDescriber),
        opts,
    )
    .await
    .unwrap();

    let paths: Vec<_> = outcomes
        .iter()
        .map(|o| o.artifact.clone().unwrap())
        .collect();
    assert_ne!(paths[0], paths[1]);
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);

    // Each file holds its own scenario's prices
    for (path, price) in paths.iter().zip([20.0, 900.0]) {
        let artifact = load_results(path).await.unwrap();
        assert_eq!(artifact.state.product_info.unwrap().price, price);
    }

    cleanup_temp_dir(&dir);
}

#[tokio::test]
async fn test_bad_persona_set_fails_whole_batch() {
    let mut opts = options(1);
    opts.personas = Vec::new();

    assert!(run_scenarios(vec![scenario("Lamp", 20.0)], Arc::new(FailingDescriber), opts)
        .await
        .is_err());
}
