//! Pre-flight check that an image URL points at an image.

use std::time::Duration;

const HEAD_TIMEOUT: Duration = Duration::from_secs(10);

/// How an image reference will be handed to the describer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// `http://` or `https://`
    Remote,
    /// Inline `data:image/...` URL
    Inline,
    Unsupported,
}

pub fn classify_image_source(image_url: &str) -> ImageSource {
    let lower = image_url.trim().to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        ImageSource::Remote
    } else if lower.starts_with("data:image/") {
        ImageSource::Inline
    } else {
        ImageSource::Unsupported
    }
}

/// True if the URL is usable as an image reference
///
/// Remote URLs are probed with a HEAD request whose `content-type` must be
/// `image/*`; network errors count as invalid.
pub async fn validate_image_url(image_url: &str) -> bool {
    match classify_image_source(image_url) {
        ImageSource::Inline => true,
        ImageSource::Unsupported => false,
        ImageSource::Remote => {
            let client = match reqwest::Client::builder().timeout(HEAD_TIMEOUT).build() {
                Ok(client) => client,
                Err(e) => {
                    tracing::warn!("could not build HTTP client: {}", e);
                    return false;
                }
            };

            match client.head(image_url).send().await {
                Ok(response) => response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.starts_with("image/"))
                    .unwrap_or(false),
                Err(e) => {
                    tracing::debug!("HEAD {} failed: {}", image_url, e);
                    false
                }
            }
        }
    }
}
