//! OpenAI vision describer
//!
//! Two chat-completions calls per image: a marketing analysis of the image,
//! then a one-phrase product category inferred from that analysis.

use async_trait::async_trait;
use serde::Deserialize;

use super::describer::{DescribeResult, ImageAnalysis, ImageAnalysisError, ImageDescriber};
use crate::config::AppConfig;

const ANALYST_PROMPT: &str = "You are an expert marketing analyst. Analyze this marketing image and provide:
1. A detailed description of what you see
2. The product category
3. Key visual elements and marketing messages
4. Target demographic indicators
5. Emotional appeals being used

Be specific and detailed in your analysis.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Vision describer backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiVisionDescriber {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl OpenAiVisionDescriber {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            api_url: api_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.model.clone(),
            config.api_url.clone(),
        )
    }

    fn analysis_body(&self, image_url: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "system", "content": ANALYST_PROMPT },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "Analyze this marketing image:" },
                        { "type": "image_url", "image_url": { "url": image_url } }
                    ]
                }
            ]
        })
    }

    fn category_body(&self, description: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "max_tokens": 16,
            "messages": [{
                "role": "user",
                "content": format!(
                    "Based on this image analysis, what product category is this? Respond with just the category: {}",
                    description
                )
            }]
        })
    }

    async fn complete(&self, body: &serde_json::Value) -> DescribeResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ImageAnalysisError::MissingApiKey)?;

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ImageAnalysisError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| ImageAnalysisError::Network(e.to_string()))?;

        if status != 200 {
            return Err(ImageAnalysisError::Http {
                status,
                body: body_text,
            });
        }

        parse_completion(&body_text)
    }
}

/// Extract the first choice's text from a chat-completions response body
pub fn parse_completion(body: &str) -> DescribeResult<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ImageAnalysisError::Parse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ImageAnalysisError::EmptyResponse)
}

#[async_trait]
impl ImageDescriber for OpenAiVisionDescriber {
    fn name(&self) -> &str {
        "openai"
    }

    async fn describe(&self, image_url: &str) -> DescribeResult<ImageAnalysis> {
        let description = self.complete(&self.analysis_body(image_url)).await?;

        // A failed category guess still leaves a usable description
        let inferred_category = match self.complete(&self.category_body(&description)).await {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::debug!("category inference failed: {}", e);
                None
            }
        };

        Ok(ImageAnalysis {
            description,
            inferred_category,
        })
    }
}
