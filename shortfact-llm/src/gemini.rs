use crate::traits::{CitationCandidate, GroundedLlm, GroundedReply};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shortfact_common::{Result, ShortfactError};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Request-side tool declaration. `googleSearch: {}` switches on web-search
/// grounding for the whole generation.
#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearchTool,
}

#[derive(Debug, Serialize)]
struct GoogleSearchTool {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GeminiGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingChunk {
    web: Option<GeminiGroundingWeb>,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingWeb {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsageMetadata {
    #[serde(rename = "totalTokenCount")]
    total_token_count: Option<u32>,
}

/// Google Gemini API client with web-search grounding.
///
/// Requires a valid API key and internet access. One HTTP request per
/// generation; no retries.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl GeminiClient {
    /// Create a new client using the provided API key and model.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ShortfactError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            model,
            temperature: None,
            max_output_tokens: None,
        })
    }

    /// Override generation knobs from configuration.
    pub fn with_generation(mut self, temperature: Option<f32>, max_output_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Point the client at a different endpoint (integration tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn generation_config(&self) -> Option<GeminiGenerationConfig> {
        if self.temperature.is_some() || self.max_output_tokens.is_some() {
            Some(GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            })
        } else {
            None
        }
    }
}

#[async_trait]
impl GroundedLlm for GeminiClient {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.generation_config(),
            tools: vec![GeminiTool {
                google_search: GoogleSearchTool {},
            }],
        };

        tracing::debug!(model = %self.model, "Sending grounded Gemini request");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| ShortfactError::Llm(format!("Gemini request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                429 => ShortfactError::Llm("Rate limit exceeded".to_string()),
                401 => ShortfactError::Llm("Invalid API key".to_string()),
                403 => ShortfactError::Llm("API access forbidden".to_string()),
                _ => ShortfactError::Llm(format!("Gemini API error ({}): {}", status, error_text)),
            });
        }

        let gemini_response: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| ShortfactError::Llm(format!("Failed to parse Gemini response: {}", e)))?;

        if gemini_response.candidates.is_empty() {
            return Err(ShortfactError::Llm(
                "No candidates returned from Gemini".to_string(),
            ));
        }

        let candidate = &gemini_response.candidates[0];

        if let Some(finish_reason) = &candidate.finish_reason {
            if finish_reason == "SAFETY" {
                return Err(ShortfactError::Llm(
                    "Content blocked by Gemini safety filters".to_string(),
                ));
            }
        }

        if candidate.content.parts.is_empty() {
            return Err(ShortfactError::Llm(
                "No content parts in Gemini response".to_string(),
            ));
        }

        // Grounded replies may arrive split across parts.
        let text = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<String>();

        let citations = candidate
            .grounding_metadata
            .as_ref()
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .map(|chunk| match &chunk.web {
                        Some(web) => CitationCandidate {
                            uri: web.uri.clone(),
                            title: web.title.clone(),
                        },
                        None => CitationCandidate::default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let tokens_used = gemini_response
            .usage_metadata
            .and_then(|u| u.total_token_count);

        Ok(GroundedReply {
            text,
            citations,
            model: Some(self.model.clone()),
            tokens_used,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
