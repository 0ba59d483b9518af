//! Persona A/B testing workflow
//!
//! A run threads one [`WorkflowState`] through five stages (see
//! [`workflow`]) and produces [`TestResults`]. The surrounding modules
//! handle the command line, reports and persisted artifacts.

pub mod aggregator;
pub mod cli;
pub mod collect;
pub mod image_stage;
pub mod output;
pub mod report;
pub mod scenarios;
pub mod types;
pub mod variant_tester;
pub mod workflow;

pub use aggregator::{aggregate, analyze_results, generate_recommendations};
pub use collect::{collect_responses, organize_responses};
pub use image_stage::{analyze_image, FALLBACK_DESCRIPTION};
pub use output::{
    load_results, load_variants, sample_variants, save_results, save_results_as,
    TestRunArtifact, VariantsFile,
};
pub use report::{
    print_detailed_persona_responses, print_results_summary, render_detailed_persona_responses,
    render_results_summary,
};
pub use scenarios::{load_scenarios, run_scenarios, BatchOptions, Scenario, ScenarioOutcome};
pub use types::{
    OrganizedResponses, PersonaComparison, PersonaResponseRecord, TestResults, Variant,
    VariantInfo, WorkflowState,
};
pub use variant_tester::{effective_text, score_variant, test_variant};
pub use workflow::{ABTestingWorkflow, Stage, WorkflowConfig};
