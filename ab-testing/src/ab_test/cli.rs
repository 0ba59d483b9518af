//! CLI argument parsing for the `ab-testing` binary

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::workflow::WorkflowConfig;
use crate::config::AppConfig;
use crate::error::Result;
use crate::personas::{default_personas, personas_from_keys, PersonaModel, ProductInfo};

/// Run a persona A/B test on a marketing image
#[derive(Parser, Debug, Clone)]
#[command(name = "ab-testing", version)]
pub struct Args {
    /// URL of the marketing image (default: DEFAULT_IMAGE_URL or the sample image)
    #[arg(long)]
    pub image_url: Option<String>,

    /// Directory for the results artifact (default: OUTPUT_DIR or ./results)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Print each persona's full response for both variants
    #[arg(long)]
    pub detailed: bool,

    /// Do not write the results artifact
    #[arg(long)]
    pub no_save: bool,

    /// YAML or JSON file with `variant_a` and `variant_b` (default: built-in samples)
    #[arg(long)]
    pub variants_file: Option<PathBuf>,

    /// Base product category
    #[arg(long, default_value = "general")]
    pub category: String,

    /// Base product price in dollars
    #[arg(long, default_value_t = 49.99)]
    pub price: f64,

    /// Use this image description and skip the vision model
    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated personas (single_mother,young_male,elderly_retiree)
    #[arg(long, value_delimiter = ',')]
    pub personas: Vec<String>,

    /// Seconds to wait for image analysis before falling back
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Do not probe the image URL before running
    #[arg(long)]
    pub skip_url_check: bool,

    /// Write structured progress events to stderr
    #[arg(long)]
    pub emit_events: bool,
}

impl Args {
    /// Personas named on the command line, or all three
    pub fn parse_personas(&self) -> Result<Vec<PersonaModel>> {
        let keys: Vec<&str> = self
            .personas
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();

        if keys.is_empty() {
            Ok(default_personas())
        } else {
            personas_from_keys(&keys)
        }
    }

    pub fn product_info(&self) -> ProductInfo {
        ProductInfo::new(self.category.trim(), self.price)
    }

    /// Flags take precedence over environment configuration
    pub fn apply_to(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.image_url {
            config.default_image_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.image_analysis_timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn workflow_config(&self, config: &AppConfig) -> WorkflowConfig {
        WorkflowConfig::from(&self.apply_to(config.clone()))
    }
}
