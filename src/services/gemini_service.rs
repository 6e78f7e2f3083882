use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::config::GeminiConfig;
use crate::models::{GeminiAnswer, GenerateContentRequest, GenerateContentResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends one prompt and returns the first candidate's text with the elapsed time.
    pub async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<GeminiAnswer> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => bail!("GEMINI_API_KEY is not configured"),
        };

        let body = GenerateContentRequest::new(prompt, system_instruction);
        let started = Instant::now();

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .context("request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("upstream returned {}: {}", status, detail.trim()));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("could not decode response")?;

        let text = parsed
            .first_text()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("response contained no text candidate"))?;

        let generation_time = started.elapsed().as_secs_f64();
        tracing::info!(model = %self.config.model, generation_time, "Gemini answered");

        Ok(GeminiAnswer {
            response: text,
            generation_time,
        })
    }
}
