//! Stage 1: describe the marketing image
//!
//! The only stage that waits on the network. Failure or timeout of the
//! describer never aborts the run: the stage substitutes
//! [`FALLBACK_DESCRIPTION`] and keeps the caller's product info (or
//! [`ProductInfo::fallback`] when there is none).

use std::time::Duration;

use ab_testing_sdk::log_fallback;

use super::types::WorkflowState;
use super::workflow::Stage;
use crate::image::{ImageAnalysis, ImageAnalysisError, ImageDescriber};
use crate::personas::ProductInfo;

/// Image description used when analysis fails
pub const FALLBACK_DESCRIPTION: &str = "Image analysis unavailable. Using provided product info.";

/// Call the describer with a bounded wait
pub async fn describe_with_timeout(
    describer: &dyn ImageDescriber,
    image_url: &str,
    timeout: Duration,
) -> Result<ImageAnalysis, ImageAnalysisError> {
    match tokio::time::timeout(timeout, describer.describe(image_url)).await {
        Ok(result) => result,
        Err(_) => Err(ImageAnalysisError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }),
    }
}

pub async fn analyze_image(
    describer: &dyn ImageDescriber,
    timeout: Duration,
    mut state: WorkflowState,
) -> WorkflowState {
    match describe_with_timeout(describer, &state.image_url, timeout).await {
        Ok(analysis) => {
            let mut product = state.product_info.take().unwrap_or_default();
            if product.category.trim().is_empty() {
                if let Some(category) = analysis
                    .inferred_category
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                {
                    tracing::debug!("using inferred category '{}'", category);
                    product.category = category;
                }
            }

            state.image_description = analysis.description;
            state.product_info = Some(product);
        }
        Err(e) => {
            tracing::warn!(
                describer = describer.name(),
                "image analysis failed, using fallback content: {}",
                e
            );
            log_fallback!(Stage::AnalyzeImage.number(), e);

            state.image_description = FALLBACK_DESCRIPTION.to_string();
            let product = state.product_info.take().unwrap_or_else(ProductInfo::fallback);
            state.product_info = Some(product);
        }
    }

    state
}
