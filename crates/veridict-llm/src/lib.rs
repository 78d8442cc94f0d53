//! Veridict model provider layer
//!
//! Pluggable implementations of the `VerdictModel` capability from
//! `veridict-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic, scriptable mock for testing
//! - `OllamaProvider`: local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use veridict_llm::MockProvider;
//! use veridict_domain::traits::{SamplingOptions, VerdictModel};
//!
//! let provider = MockProvider::new("{\"ok\": true}");
//! let opts = SamplingOptions::at_temperature(0.2);
//! let result = provider.complete("any prompt", &opts).unwrap();
//! assert_eq!(result, "{\"ok\": true}");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use veridict_domain::traits::{SamplingOptions, VerdictModel};

pub use ollama::OllamaProvider;

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}

#[derive(Debug)]
enum Responder {
    Fixed(String),
    Error(String),
    Sequence(VecDeque<String>),
}

/// Deterministic mock provider for testing
///
/// Responses resolve in order: a global FIFO script first (one response per
/// call, for strictly sequential protocols), then substring-keyed
/// responders, then the default. Keyed responders can be a fixed response,
/// an injected error, or a sequence consumed per matching call (the last
/// entry repeats once the sequence drains, which suits resampling steps that
/// reissue the same prompt). No network calls are made.
///
/// # Examples
///
/// ```
/// use veridict_llm::MockProvider;
/// use veridict_domain::traits::{SamplingOptions, VerdictModel};
///
/// let provider = MockProvider::new("default");
/// provider.respond_when("ADVOCATE", "advocate answer");
/// let opts = SamplingOptions::at_temperature(0.0);
/// assert_eq!(provider.complete("ROLE: ADVOCATE ...", &opts).unwrap(), "advocate answer");
/// assert_eq!(provider.complete("something else", &opts).unwrap(), "default");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<String>>>,
    keyed: Arc<Mutex<Vec<(String, Responder)>>>,
    calls: Arc<Mutex<Vec<(String, SamplingOptions)>>>,
}

impl MockProvider {
    /// Create a provider with a fixed default response
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            keyed: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response consumed by the next call, regardless of prompt
    pub fn push_response(&self, response: impl Into<String>) {
        self.script.lock().unwrap().push_back(response.into());
    }

    /// Respond with `response` whenever the prompt contains `needle`
    ///
    /// Matching is first-registered-wins.
    pub fn respond_when(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.keyed
            .lock()
            .unwrap()
            .push((needle.into(), Responder::Fixed(response.into())));
    }

    /// Respond with successive entries of `responses` on each matching call;
    /// the last entry repeats once the sequence drains
    pub fn respond_seq_when(&self, needle: impl Into<String>, responses: Vec<String>) {
        self.keyed.lock().unwrap().push((
            needle.into(),
            Responder::Sequence(responses.into_iter().collect()),
        ));
    }

    /// Fail with an error whenever the prompt contains `needle`
    pub fn fail_when(&self, needle: impl Into<String>, message: impl Into<String>) {
        self.keyed
            .lock()
            .unwrap()
            .push((needle.into(), Responder::Error(message.into())));
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Sampling options recorded per call, in order
    pub fn recorded_sampling(&self) -> Vec<SamplingOptions> {
        self.calls.lock().unwrap().iter().map(|(_, s)| *s).collect()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl VerdictModel for MockProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, sampling: &SamplingOptions) -> Result<String, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *sampling));

        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return Ok(scripted);
        }

        let mut keyed = self.keyed.lock().unwrap();
        for (needle, responder) in keyed.iter_mut() {
            if !prompt.contains(needle.as_str()) {
                continue;
            }
            return match responder {
                Responder::Fixed(response) => Ok(response.clone()),
                Responder::Error(message) => Err(LlmError::Other(message.clone())),
                Responder::Sequence(queue) => {
                    let next = if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    };
                    next.ok_or_else(|| LlmError::Other("empty response sequence".to_string()))
                }
            };
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> SamplingOptions {
        SamplingOptions::at_temperature(0.0)
    }

    #[test]
    fn test_mock_default_response() {
        let provider = MockProvider::new("Test response");
        assert_eq!(provider.complete("anything", &opts()).unwrap(), "Test response");
    }

    #[test]
    fn test_mock_script_queue_order() {
        let provider = MockProvider::new("default");
        provider.push_response("first");
        provider.push_response("second");

        assert_eq!(provider.complete("p", &opts()).unwrap(), "first");
        assert_eq!(provider.complete("p", &opts()).unwrap(), "second");
        assert_eq!(provider.complete("p", &opts()).unwrap(), "default");
    }

    #[test]
    fn test_mock_keyed_responses() {
        let provider = MockProvider::default();
        provider.respond_when("hello", "world");
        provider.respond_when("foo", "bar");

        assert_eq!(provider.complete("say hello now", &opts()).unwrap(), "world");
        assert_eq!(provider.complete("foo please", &opts()).unwrap(), "bar");
        assert_eq!(
            provider.complete("unknown", &opts()).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_mock_sequence_repeats_last() {
        let provider = MockProvider::default();
        provider.respond_seq_when("sample", vec!["a".to_string(), "b".to_string()]);

        assert_eq!(provider.complete("sample 1", &opts()).unwrap(), "a");
        assert_eq!(provider.complete("sample 2", &opts()).unwrap(), "b");
        assert_eq!(provider.complete("sample 3", &opts()).unwrap(), "b");
    }

    #[test]
    fn test_mock_error_injection() {
        let provider = MockProvider::default();
        provider.fail_when("bad prompt", "boom");

        let result = provider.complete("a bad prompt indeed", &opts());
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_call_count_and_sampling_record() {
        let provider = MockProvider::new("r");
        assert_eq!(provider.call_count(), 0);

        provider.complete("p1", &SamplingOptions::at_temperature(0.3)).unwrap();
        provider.complete("p2", &SamplingOptions::pinned(1)).unwrap();

        assert_eq!(provider.call_count(), 2);
        let sampling = provider.recorded_sampling();
        assert_eq!(sampling[0].temperature, 0.3);
        assert_eq!(sampling[1].seed, Some(1));
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let a = MockProvider::new("r");
        let b = a.clone();
        a.complete("p", &opts()).unwrap();
        assert_eq!(b.call_count(), 1);
    }
}
