//! The five-stage A/B test pipeline
//!
//! ```text
//! AnalyzeImage -> TestVariantA -> TestVariantB -> CollectResponses -> AnalyzeResults
//! ```
//!
//! Every stage takes the state by value and returns the updated state.
//! Only image analysis is allowed to fail softly; any error from a later
//! stage ends the run.

use std::sync::Arc;
use std::time::Duration;

use ab_testing_sdk::{log_stage_complete, log_stage_failed, log_stage_start};

use super::aggregator::analyze_results;
use super::collect::collect_responses;
use super::image_stage::analyze_image;
use super::types::{TestResults, Variant, WorkflowState};
use super::variant_tester::score_variant;
use crate::config::{AppConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::{AbTestError, Result};
use crate::image::ImageDescriber;
use crate::personas::{default_personas, ensure_unique, PersonaModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AnalyzeImage,
    TestVariantA,
    TestVariantB,
    CollectResponses,
    AnalyzeResults,
}

impl Stage {
    /// Execution order
    pub const PIPELINE: [Stage; 5] = [
        Stage::AnalyzeImage,
        Stage::TestVariantA,
        Stage::TestVariantB,
        Stage::CollectResponses,
        Stage::AnalyzeResults,
    ];

    /// 1-based position, as reported in stage events
    pub fn number(&self) -> usize {
        match self {
            Stage::AnalyzeImage => 1,
            Stage::TestVariantA => 2,
            Stage::TestVariantB => 3,
            Stage::CollectResponses => 4,
            Stage::AnalyzeResults => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::AnalyzeImage => "Analyze Image",
            Stage::TestVariantA => "Test Variant A",
            Stage::TestVariantB => "Test Variant B",
            Stage::CollectResponses => "Collect Responses",
            Stage::AnalyzeResults => "Analyze Results",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Stage::AnalyzeImage => "analyze_image",
            Stage::TestVariantA => "test_variant_a",
            Stage::TestVariantB => "test_variant_b",
            Stage::CollectResponses => "collect_responses",
            Stage::AnalyzeResults => "analyze_results",
        }
    }

    pub fn next(&self) -> Option<Stage> {
        Stage::PIPELINE.get(self.number()).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    /// Bound on the image describer call
    pub image_analysis_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            image_analysis_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&AppConfig> for WorkflowConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            image_analysis_timeout: config.image_analysis_timeout,
        }
    }
}

/// Runs A/B tests against a fixed, ordered persona set
///
/// Holds only read-only configuration, so one instance can serve many
/// concurrent runs.
#[derive(Clone)]
pub struct ABTestingWorkflow {
    describer: Arc<dyn ImageDescriber>,
    personas: Vec<PersonaModel>,
    config: WorkflowConfig,
}

impl ABTestingWorkflow {
    pub fn new(
        describer: Arc<dyn ImageDescriber>,
        personas: Vec<PersonaModel>,
        config: WorkflowConfig,
    ) -> Result<Self> {
        ensure_unique(&personas)?;
        Ok(Self {
            describer,
            personas,
            config,
        })
    }

    /// Workflow over the three built-in personas
    pub fn with_default_personas(
        describer: Arc<dyn ImageDescriber>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            describer,
            personas: default_personas(),
            config,
        }
    }

    pub fn personas(&self) -> &[PersonaModel] {
        &self.personas
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Run a single stage
    pub async fn run_stage(&self, stage: Stage, state: WorkflowState) -> Result<WorkflowState> {
        match stage {
            Stage::AnalyzeImage => Ok(analyze_image(
                self.describer.as_ref(),
                self.config.image_analysis_timeout,
                state,
            )
            .await),
            Stage::TestVariantA => score_variant(Variant::A, state, &self.personas),
            Stage::TestVariantB => score_variant(Variant::B, state, &self.personas),
            Stage::CollectResponses => collect_responses(state, &self.personas),
            Stage::AnalyzeResults => analyze_results(state),
        }
    }

    /// Drive `initial` through every stage and return the final state
    pub async fn run(&self, initial: WorkflowState) -> Result<WorkflowState> {
        initial.validate()?;

        let total = Stage::PIPELINE.len();
        let mut state = initial;
        for stage in Stage::PIPELINE {
            log_stage_start!(stage.number(), stage.name(), total);
            tracing::debug!(stage = stage.id(), "stage started");

            state = match self.run_stage(stage, state).await {
                Ok(next) => next,
                Err(e) => {
                    log_stage_failed!(stage.number(), stage.name(), e);
                    return Err(e);
                }
            };

            log_stage_complete!(stage.number(), stage.name());
        }

        Ok(state)
    }

    /// Run the pipeline and return only the test results
    pub async fn run_ab_test(&self, initial: WorkflowState) -> Result<TestResults> {
        self.run(initial)
            .await?
            .test_results
            .ok_or(AbTestError::MissingState {
                stage: Stage::AnalyzeResults.id(),
                field: "test_results",
            })
    }
}
