//! Persisted results artifact and variant input files

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use ab_testing_sdk::log_state_file;

use super::types::{VariantInfo, WorkflowState};
use crate::error::Result;

/// JSON document written after a run
///
/// The state is flattened, so `persona_responses` and `test_results` sit
/// at the top level next to the run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunArtifact {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: WorkflowState,
}

impl TestRunArtifact {
    pub fn new(state: WorkflowState) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            state,
        }
    }
}

/// Write `ab_test_results_<timestamp>.json` into `output_dir`
pub async fn save_results(state: &WorkflowState, output_dir: &Path) -> Result<PathBuf> {
    save_results_as(state, output_dir, None).await
}

/// Like [`save_results`], with `label` inserted before the timestamp
///
/// Never overwrites: when the name is taken (same label and second, or two
/// labels with the same slug) a `_1`, `_2`, ... suffix is appended.
pub async fn save_results_as(
    state: &WorkflowState,
    output_dir: &Path,
    label: Option<&str>,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let stem = match label {
        Some(label) => format!("ab_test_results_{}_{}", slugify(label), timestamp),
        None => format!("ab_test_results_{}", timestamp),
    };

    let artifact = TestRunArtifact::new(state.clone());
    let json = serde_json::to_string_pretty(&artifact)?;

    let (path, mut file) = create_unique(output_dir, &stem).await?;
    file.write_all(json.as_bytes()).await?;
    file.flush().await?;

    log_state_file!(path.display(), "A/B test results");
    tracing::debug!(run_id = %artifact.run_id, "saved results to {}", path.display());
    Ok(path)
}

pub async fn load_results(path: &Path) -> Result<TestRunArtifact> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn create_unique(dir: &Path, stem: &str) -> std::io::Result<(PathBuf, fs::File)> {
    let mut attempt = 0u32;
    loop {
        let filename = match attempt {
            0 => format!("{}.json", stem),
            n => format!("{}_{}.json", stem, n),
        };
        let path = dir.join(filename);
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

fn slugify(label: &str) -> String {
    let slug: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    slug.split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

// ============================================================================
// Variant inputs
// ============================================================================

/// The two variants under test, as read from a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantsFile {
    pub variant_a: VariantInfo,
    pub variant_b: VariantInfo,
}

/// Built-in feature-focused vs lifestyle-focused pair
pub fn sample_variants() -> VariantsFile {
    VariantsFile {
        variant_a: VariantInfo::new(
            "Original",
            "Standard marketing approach with product features",
        )
        .with_price(49.99)
        .with_category("consumer_goods")
        .with_field("marketing_angle", "feature_focused")
        .with_field("call_to_action", "Buy Now - Limited Time Offer")
        .with_field("color_scheme", "blue_and_white")
        .with_field("layout", "product_centered"),
        variant_b: VariantInfo::new(
            "Emotional",
            "Emotion-focused marketing emphasizing lifestyle benefits",
        )
        .with_price(49.99)
        .with_category("consumer_goods")
        .with_field("marketing_angle", "lifestyle_focused")
        .with_field("call_to_action", "Transform Your Life Today")
        .with_field("color_scheme", "warm_colors")
        .with_field("layout", "lifestyle_centered"),
    }
}

/// Read variants from JSON (`.json`) or YAML (anything else)
pub async fn load_variants(path: &Path) -> Result<VariantsFile> {
    let content = fs::read_to_string(path).await?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}
