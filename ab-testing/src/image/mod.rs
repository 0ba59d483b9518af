//! Image analysis adapter
//!
//! The workflow only sees the [`ImageDescriber`] trait. Calls may fail or
//! time out; the image stage recovers with fallback content.

pub mod describer;
pub mod openai;
pub mod url_check;

pub use describer::{
    DescribeResult, ImageAnalysis, ImageAnalysisError, ImageDescriber, StaticDescriber,
};
pub use openai::OpenAiVisionDescriber;
pub use url_check::{classify_image_source, validate_image_url, ImageSource};
