/*
┌─────────────────────────────────────────────────────────────────────────────┐
│                        PERSONA A/B TESTING WORKFLOW                         │
└─────────────────────────────────────────────────────────────────────────────┘

  Stage 1: ANALYZE IMAGE
    │
    ├─> Vision model describes the marketing image (or --description)
    ├─> Infers a product category when none is given
    └─> On error/timeout: fallback description + supplied product info

         ↓

  Stage 2/3: TEST VARIANT A / VARIANT B
    │
    └─> Every persona scores image description + variant copy

         ↓

  Stage 4: COLLECT RESPONSES
    │
    └─> Exactly one response per (variant, persona)

         ↓

  Stage 5: ANALYZE RESULTS
    │
    ├─> Averages, winner (ties go to B), confidence
    └─> Output: results/ab_test_results_<timestamp>.json

EXAMPLE COMMANDS:

  # Sample image and built-in variants
  cargo run --bin ab-testing

  # Own image and variants, full persona breakdown
  cargo run --bin ab-testing -- \
    --image-url https://example.com/ad.jpg \
    --variants-file fixtures/sample_variants.yaml \
    --category baby --price 29.99 --detailed

  # Offline: known description, two personas, no artifact
  cargo run --bin ab-testing -- \
    --description "A stroller in a sunny park" \
    --personas single_mother,elderly_retiree --no-save
*/

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;

use ab_testing::ab_test::cli::Args;
use ab_testing::ab_test::{
    load_variants, print_detailed_persona_responses, print_results_summary, sample_variants,
    save_results, ABTestingWorkflow, WorkflowState,
};
use ab_testing::config::AppConfig;
use ab_testing::image::{validate_image_url, ImageDescriber, OpenAiVisionDescriber, StaticDescriber};
use ab_testing_sdk::{log_file_saved, log_info, log_warning, set_event_output};

#[tokio::main]
async fn main() -> Result<()> {
    ab_testing::logging::init();
    let args = Args::parse();
    set_event_output(args.emit_events);

    let config = args.apply_to(AppConfig::load()?);
    let image_url = config.default_image_url.clone();
    if config.uses_sample_image() {
        log_info!("Using sample image: {}", image_url);
    }

    if !args.skip_url_check && !validate_image_url(&image_url).await {
        bail!("Invalid image URL: {}", image_url);
    }

    let variants = match &args.variants_file {
        Some(path) => load_variants(path)
            .await
            .with_context(|| format!("Failed to load variants from {}", path.display()))?,
        None => sample_variants(),
    };

    let describer: Arc<dyn ImageDescriber> = match &args.description {
        Some(text) => Arc::new(StaticDescriber::new(text.clone())),
        None => {
            if config.openai_api_key.is_none() {
                log_warning!("OPENAI_API_KEY is not set; image analysis will fall back");
            }
            Arc::new(OpenAiVisionDescriber::from_config(&config))
        }
    };

    let workflow = ABTestingWorkflow::new(
        describer,
        args.parse_personas()?,
        args.workflow_config(&config),
    )?;

    println!("Starting A/B Test Simulation...");
    println!("Analyzing image: {}", image_url);
    println!(
        "Variant A: {} - {}",
        variants.variant_a.name, variants.variant_a.description
    );
    println!(
        "Variant B: {} - {}",
        variants.variant_b.name, variants.variant_b.description
    );

    let initial = WorkflowState::new(
        image_url,
        Some(args.product_info()),
        variants.variant_a,
        variants.variant_b,
    );
    let state = workflow.run(initial).await.context("A/B test run failed")?;

    if let Some(results) = &state.test_results {
        print_results_summary(results);
    }
    if args.detailed {
        print_detailed_persona_responses(&state);
    }

    if !args.no_save {
        let path = save_results(&state, &config.output_dir)
            .await
            .context("Failed to save results")?;
        log_file_saved!(path.display());
    }

    println!("\nA/B Test Simulation Complete!");
    Ok(())
}
