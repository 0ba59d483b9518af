//! Image description seam consumed by the workflow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type DescribeResult<T> = Result<T, ImageAnalysisError>;

/// Image analysis failures
///
/// The workflow recovers from every variant by falling back to caller
/// supplied product info.
#[derive(Debug, thiserror::Error)]
pub enum ImageAnalysisError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

/// What a vision model saw in a marketing image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub description: String,
    #[serde(default)]
    pub inferred_category: Option<String>,
}

/// Turns an image URL into a description and a product category guess
#[async_trait]
pub trait ImageDescriber: Send + Sync {
    /// Describer name for logs
    fn name(&self) -> &str;

    async fn describe(&self, image_url: &str) -> DescribeResult<ImageAnalysis>;
}

/// Returns a fixed analysis without any network call
///
/// Used when the caller already has a description of the image, and in
/// offline runs.
#[derive(Debug, Clone)]
pub struct StaticDescriber {
    analysis: ImageAnalysis,
}

impl StaticDescriber {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            analysis: ImageAnalysis {
                description: description.into(),
                inferred_category: None,
            },
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.analysis.inferred_category = Some(category.into());
        self
    }
}

#[async_trait]
impl ImageDescriber for StaticDescriber {
    fn name(&self) -> &str {
        "static"
    }

    async fn describe(&self, _image_url: &str) -> DescribeResult<ImageAnalysis> {
        Ok(self.analysis.clone())
    }
}
