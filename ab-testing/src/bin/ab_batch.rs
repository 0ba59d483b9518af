/*
  Run many A/B scenarios concurrently from one YAML file.

  scenarios:
    - name: Baby Products
      image_url: https://...
      image_description: optional, skips the vision model
      product_info: { category: baby, price: 29.99 }
      variant_a: { name: Original, description: ... }
      variant_b: { name: Premium, description: ..., price: 35.99 }

EXAMPLE COMMANDS:

  cargo run --bin ab-batch -- --scenarios fixtures/sample_scenarios.yaml
  cargo run --bin ab-batch -- --scenarios fixtures/sample_scenarios.yaml --batch-size 3 --no-save
*/

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ab_testing::ab_test::{load_scenarios, run_scenarios, BatchOptions, WorkflowConfig};
use ab_testing::config::AppConfig;
use ab_testing::image::OpenAiVisionDescriber;
use ab_testing::personas::{default_personas, personas_from_keys};
use ab_testing_sdk::{
    log_file_saved, log_found, log_progress, log_stage_complete_console, log_stage_start_console,
    log_warning, set_event_output, WorkflowStatus,
};

/// Run a file of A/B test scenarios
#[derive(Parser, Debug)]
#[command(name = "ab-batch", version)]
struct Args {
    /// YAML scenario file
    #[arg(long)]
    scenarios: PathBuf,

    /// Number of scenarios to run in parallel
    #[arg(long, default_value = "1")]
    batch_size: usize,

    /// Directory for results artifacts (default: OUTPUT_DIR or ./results)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Do not write results artifacts
    #[arg(long)]
    no_save: bool,

    /// Comma-separated personas (default: all three)
    #[arg(long, value_delimiter = ',')]
    personas: Vec<String>,

    /// Seconds to wait for image analysis before falling back
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print outcomes as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write structured progress events to stderr
    #[arg(long)]
    emit_events: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    ab_testing::logging::init();
    let args = Args::parse();
    set_event_output(args.emit_events);

    let mut config = AppConfig::load()?;
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.image_analysis_timeout = Duration::from_secs(secs);
    }

    let scenarios = load_scenarios(&args.scenarios)
        .await
        .with_context(|| format!("Failed to load scenarios from {}", args.scenarios.display()))?;
    let personas = if args.personas.is_empty() {
        default_personas()
    } else {
        personas_from_keys(&args.personas)?
    };

    if !args.json {
        log_found!(scenarios.len(), "scenarios");
        log_stage_start_console!(1, "Run Scenarios", format!("batch size {}", args.batch_size));
    }

    let options = BatchOptions {
        batch_size: args.batch_size,
        output_dir: (!args.no_save).then(|| config.output_dir.clone()),
        workflow: WorkflowConfig::from(&config),
        personas,
    };
    let describer = Arc::new(OpenAiVisionDescriber::from_config(&config));
    let outcomes = run_scenarios(scenarios, describer, options).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        log_stage_complete_console!(1);
        for (i, outcome) in outcomes.iter().enumerate() {
            println!("\n=== {} ===", outcome.name);
            log_progress!(i + 1, outcomes.len(), "scenarios");
            match (&outcome.status, &outcome.results) {
                (WorkflowStatus::Completed, Some(results)) => {
                    println!(
                        "Winner: Variant {} (Confidence: {:.2}%)",
                        results.winner,
                        results.confidence_score * 100.0
                    );
                    for (persona, analysis) in &results.persona_analysis {
                        println!(
                            "  {}: prefers {} ({:.2}% vs {:.2}%)",
                            persona.display_name(),
                            analysis.preferred_variant,
                            analysis.variant_a_score * 100.0,
                            analysis.variant_b_score * 100.0
                        );
                    }
                    if let Some(path) = &outcome.artifact {
                        log_file_saved!(path.display());
                    }
                }
                _ => {
                    log_warning!(
                        "failed: {}",
                        outcome.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }
    }

    let failed = outcomes
        .iter()
        .filter(|o| o.status == WorkflowStatus::Failed)
        .count();
    if failed > 0 {
        anyhow::bail!("{} of {} scenarios failed", failed, outcomes.len());
    }
    Ok(())
}
