//! Group chat configuration.

use serde::Deserialize;
use std::time::Duration;

use parley_core::{ChatError, ChatResult};

/// Default hard ceiling on rounds per run.
pub const DEFAULT_MAXIMUM_ITERATIONS: u32 = 10;

/// Default completion marker, matched case-insensitively.
pub const DEFAULT_COMPLETION_MARKER: &str = "no action needed";

/// Bounded retry policy for failed agent invocations.
///
/// The default performs no retries: the first invocation failure aborts
/// the run with the history preserved up to that point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Fixed delay between attempts
    #[serde(with = "duration_millis")]
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry count and backoff.
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }
}

/// Configuration for a [`GroupChat`](crate::GroupChat).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Hard ceiling on rounds per run, independent of the termination
    /// strategy's judgment. Must be greater than zero.
    pub maximum_iterations: u32,
    /// Clear strategy-internal state between independent runs.
    pub automatic_reset: bool,
    /// Phrase signaling an agent has no further action, matched
    /// case-insensitively by the marker-based termination strategies.
    pub completion_marker: String,
    /// Retry policy applied to failed agent invocations.
    pub retry: RetryPolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            maximum_iterations: DEFAULT_MAXIMUM_ITERATIONS,
            automatic_reset: true,
            completion_marker: DEFAULT_COMPLETION_MARKER.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ChatConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hard ceiling on rounds.
    pub fn with_maximum_iterations(mut self, maximum_iterations: u32) -> Self {
        self.maximum_iterations = maximum_iterations;
        self
    }

    /// Enable or disable automatic strategy reset between runs.
    pub fn with_automatic_reset(mut self, automatic_reset: bool) -> Self {
        self.automatic_reset = automatic_reset;
        self
    }

    /// Set the completion marker.
    pub fn with_completion_marker(mut self, marker: impl Into<String>) -> Self {
        self.completion_marker = marker.into();
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ChatResult<()> {
        if self.maximum_iterations == 0 {
            return Err(ChatError::InvalidConfig {
                reason: "maximum_iterations must be greater than zero".to_string(),
            });
        }
        if self.completion_marker.trim().is_empty() {
            return Err(ChatError::InvalidConfig {
                reason: "completion_marker must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.maximum_iterations, 10);
        assert!(config.automatic_reset);
        assert_eq!(config.completion_marker, "no action needed");
        assert_eq!(config.retry.max_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = ChatConfig::default().with_maximum_iterations(0);
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_blank_marker_rejected() {
        let config = ChatConfig::default().with_completion_marker("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = ChatConfig::new()
            .with_maximum_iterations(3)
            .with_automatic_reset(false)
            .with_completion_marker("all done")
            .with_retry(RetryPolicy::new(2, Duration::from_millis(10)));
        assert_eq!(config.maximum_iterations, 3);
        assert!(!config.automatic_reset);
        assert_eq!(config.completion_marker, "all done");
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ChatConfig =
            serde_json::from_str(r#"{"maximum_iterations": 5, "retry": {"max_retries": 1, "backoff": 250}}"#)
                .unwrap();
        assert_eq!(config.maximum_iterations, 5);
        assert_eq!(config.retry.backoff, Duration::from_millis(250));
        // Unspecified fields fall back to defaults
        assert!(config.automatic_reset);
    }
}
