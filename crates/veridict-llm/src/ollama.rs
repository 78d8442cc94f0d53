//! Ollama provider implementation
//!
//! Integration with Ollama's local LLM API for running the debate roles
//! against a local model.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and model
//! - Per-call sampling options (temperature, pinned seed)
//! - Retry logic with exponential backoff for transport failures
//!
//! # Examples
//!
//! ```no_run
//! use veridict_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3");
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use veridict_domain::traits::{SamplingOptions, VerdictModel};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for model requests (60 seconds; debate prompts are long)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of transport-level retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local model inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of transport retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run a completion against the Ollama API
    ///
    /// # Errors
    ///
    /// Returns an error if Ollama is unreachable, the model is missing, or
    /// the response body does not parse.
    pub async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingOptions,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: sampling.temperature,
                seed: sampling.seed,
            },
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(body) => Ok(body.response),
                            Err(e) => Err(LlmError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl VerdictModel for OllamaProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, sampling: &SamplingOptions) -> Result<String, Self::Error> {
        // Blocking wrapper; the debate engine calls this from spawn_blocking
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| LlmError::Other(format!("Runtime error: {}", e)))?;
        runtime.block_on(self.generate(prompt, sampling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama3");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model, "llama3");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_seed_is_omitted_when_unset() {
        let options = OllamaOptions {
            temperature: 0.4,
            seed: None,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(!json.contains("seed"));

        let pinned = OllamaOptions {
            temperature: 0.0,
            seed: Some(42),
        };
        let json = serde_json::to_string(&pinned).unwrap();
        assert!(json.contains("\"seed\":42"));
    }

    #[tokio::test]
    async fn test_error_handling_unreachable_endpoint() {
        let provider =
            OllamaProvider::new("http://localhost:1", "llama3").with_max_retries(1);

        let result = provider
            .generate("test", &SamplingOptions::at_temperature(0.0))
            .await;
        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.err()),
        }
    }

    // Integration test (requires running Ollama)
    #[tokio::test]
    #[ignore]
    async fn test_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3");
        let result = provider
            .generate("Say 'hello' and nothing else", &SamplingOptions::at_temperature(0.0))
            .await;
        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}
