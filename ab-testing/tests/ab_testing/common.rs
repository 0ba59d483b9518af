//! Common test utilities for A/B testing tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ab_testing::ab_test::{
    ABTestingWorkflow, PersonaResponseRecord, Variant, VariantInfo, WorkflowConfig, WorkflowState,
};
use ab_testing::image::{
    DescribeResult, ImageAnalysis, ImageAnalysisError, ImageDescriber, StaticDescriber,
};
use ab_testing::personas::{Archetype, PersonaResponse, ProductInfo};

pub const IMAGE_URL: &str = "https://example.com/ad.jpg";

/// Create a temporary directory for testing
pub fn create_temp_dir(name: &str) -> PathBuf {
    let temp_dir = std::env::temp_dir().join(format!("ab_testing_test_{}", name));
    if temp_dir.exists() {
        std::fs::remove_dir_all(&temp_dir).unwrap();
    }
    std::fs::create_dir_all(&temp_dir).unwrap();
    temp_dir
}

/// Clean up temporary directory
pub fn cleanup_temp_dir(path: &PathBuf) {
    if path.exists() {
        std::fs::remove_dir_all(path).ok();
    }
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Always fails, like an unreachable vision endpoint
pub struct FailingDescriber;

#[async_trait]
impl ImageDescriber for FailingDescriber {
    fn name(&self) -> &str {
        "failing"
    }

    async fn describe(&self, _image_url: &str) -> DescribeResult<ImageAnalysis> {
        Err(ImageAnalysisError::Http {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

/// Answers only after `delay`
pub struct SlowDescriber {
    pub delay: Duration,
}

#[async_trait]
impl ImageDescriber for SlowDescriber {
    fn name(&self) -> &str {
        "slow"
    }

    async fn describe(&self, _image_url: &str) -> DescribeResult<ImageAnalysis> {
        tokio::time::sleep(self.delay).await;
        Ok(ImageAnalysis {
            description: "too late".to_string(),
            inferred_category: Some("tech".to_string()),
        })
    }
}

pub fn static_workflow(description: &str) -> ABTestingWorkflow {
    ABTestingWorkflow::with_default_personas(
        Arc::new(StaticDescriber::new(description)),
        WorkflowConfig::default(),
    )
}

pub fn initial_state(
    product: Option<ProductInfo>,
    variant_a: VariantInfo,
    variant_b: VariantInfo,
) -> WorkflowState {
    WorkflowState::new(IMAGE_URL, product, variant_a, variant_b)
}

pub fn record(variant: Variant, persona: Archetype, likelihood: f64) -> PersonaResponseRecord {
    PersonaResponseRecord {
        variant,
        persona,
        response: PersonaResponse {
            persona_type: persona,
            purchase_likelihood: likelihood,
            reasoning: format!("{} reasoning for {}", persona, variant),
            key_factors: Vec::new(),
            emotional_response: "Neutral".to_string(),
            budget_consideration: String::new(),
        },
    }
}

/// One record per (variant, persona) from (persona, a_score, b_score) triples
pub fn paired_records(scores: &[(Archetype, f64, f64)]) -> Vec<PersonaResponseRecord> {
    let mut records = Vec::new();
    for (persona, a, _) in scores {
        records.push(record(Variant::A, *persona, *a));
    }
    for (persona, _, b) in scores {
        records.push(record(Variant::B, *persona, *b));
    }
    records
}

/// The same records with A and B swapped
pub fn swap_labels(records: &[PersonaResponseRecord]) -> Vec<PersonaResponseRecord> {
    records
        .iter()
        .map(|r| PersonaResponseRecord {
            variant: r.variant.other(),
            ..r.clone()
        })
        .collect()
}
