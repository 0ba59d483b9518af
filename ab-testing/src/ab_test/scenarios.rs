//! Batch runs: many independent A/B tests from one scenario file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use ab_testing_sdk::WorkflowStatus;

use super::output::save_results_as;
use super::types::{TestResults, VariantInfo, WorkflowState};
use super::workflow::{ABTestingWorkflow, Stage, WorkflowConfig};
use crate::batch::{execute_batch, execute_task, TaskContext};
use crate::error::{AbTestError, Result};
use crate::image::{ImageDescriber, StaticDescriber};
use crate::personas::{PersonaModel, ProductInfo};

/// One A/B test to run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub image_url: String,

    /// Known description; skips the image describer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_info: Option<ProductInfo>,

    pub variant_a: VariantInfo,
    pub variant_b: VariantInfo,
}

impl Scenario {
    pub fn initial_state(&self) -> WorkflowState {
        WorkflowState::new(
            self.image_url.clone(),
            self.product_info.clone(),
            self.variant_a.clone(),
            self.variant_b.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub scenarios: Vec<Scenario>,
}

pub async fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let content = fs::read_to_string(path).await?;
    let file: ScenarioFile = serde_yaml::from_str(&content)?;
    if file.scenarios.is_empty() {
        return Err(AbTestError::InvalidInput(format!(
            "{} contains no scenarios",
            path.display()
        )));
    }
    Ok(file.scenarios)
}

/// Result of one scenario in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub status: WorkflowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<TestResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum scenarios in flight
    pub batch_size: usize,
    /// Where to save one artifact per completed scenario; `None` disables saving
    pub output_dir: Option<PathBuf>,
    pub workflow: WorkflowConfig,
    pub personas: Vec<PersonaModel>,
}

/// Run every scenario, each as its own workflow
///
/// Scenarios with an `image_description` use it directly; the rest go
/// through `describer`. Outcomes are returned in input order.
pub async fn run_scenarios(
    scenarios: Vec<Scenario>,
    describer: Arc<dyn ImageDescriber>,
    options: BatchOptions,
) -> anyhow::Result<Vec<ScenarioOutcome>> {
    // Reject a bad persona set once, up front
    ABTestingWorkflow::new(describer.clone(), options.personas.clone(), options.workflow.clone())?;

    let BatchOptions {
        batch_size,
        output_dir,
        workflow,
        personas,
    } = options;
    let shared = Arc::new((describer, personas, workflow, output_dir));

    execute_batch(0, scenarios, batch_size, move |scenario, ctx| {
        let shared = shared.clone();
        async move {
            let (describer, personas, config, output_dir) = shared.as_ref();
            run_scenario(
                scenario,
                describer.clone(),
                personas.clone(),
                config.clone(),
                output_dir.as_deref(),
                ctx,
            )
            .await
        }
    })
    .await
}

async fn run_scenario(
    scenario: Scenario,
    describer: Arc<dyn ImageDescriber>,
    personas: Vec<PersonaModel>,
    config: WorkflowConfig,
    output_dir: Option<&Path>,
    ctx: TaskContext,
) -> ScenarioOutcome {
    let name = scenario.name.clone();
    let task_id = format!("scenario_{}", ctx.task_number);
    let description = format!("A/B test '{}' ({}/{})", name, ctx.task_number, ctx.total_tasks);

    let describer: Arc<dyn ImageDescriber> = match &scenario.image_description {
        Some(text) => Arc::new(StaticDescriber::new(text.clone())),
        None => describer,
    };

    let outcome = execute_task(task_id, description, ctx, || async move {
        let workflow = ABTestingWorkflow::new(describer, personas, config)?;
        let state = workflow.run(scenario.initial_state()).await?;

        let artifact = match output_dir {
            Some(dir) => Some(save_results_as(&state, dir, Some(&scenario.name)).await?),
            None => None,
        };
        let results = state.test_results.ok_or(AbTestError::MissingState {
            stage: Stage::AnalyzeResults.id(),
            field: "test_results",
        })?;

        let summary = format!(
            "winner {} (confidence {:.2}%)",
            results.winner,
            results.confidence_score * 100.0
        );
        Ok::<_, AbTestError>(((results, artifact), summary))
    })
    .await;

    match outcome {
        Ok((results, artifact)) => ScenarioOutcome {
            name,
            status: WorkflowStatus::Completed,
            results: Some(results),
            artifact,
            error: None,
        },
        Err(e) => {
            tracing::warn!(scenario = %name, "scenario failed: {}", e);
            ScenarioOutcome {
                name,
                status: WorkflowStatus::Failed,
                results: None,
                artifact: None,
                error: Some(e.to_string()),
            }
        }
    }
}
