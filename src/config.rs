//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::advice::AdviceConfig;
use crate::error::ConfigError;

/// Default model for material advice.
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-2.5-flash";

/// Runtime configuration for the intake binary.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Advice provider settings; `None` when no API key is set.
    pub advice: Option<AdviceConfig>,
    /// Simulated latency of a submission.
    pub submit_delay: Duration,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            advice: None,
            submit_delay: Duration::from_millis(2000),
        }
    }
}

impl IntakeConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let submit_delay = match var("ESTIMATE_SUBMIT_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_number("ESTIMATE_SUBMIT_DELAY_MS", &raw)?),
            None => Self::default().submit_delay,
        };

        let advice = match var("GEMINI_API_KEY").or_else(|| var("API_KEY")) {
            Some(key) => {
                let timeout_secs = match var("ESTIMATE_ADVICE_TIMEOUT_SECS") {
                    Some(raw) => parse_number("ESTIMATE_ADVICE_TIMEOUT_SECS", &raw)?,
                    None => 30,
                };
                Some(AdviceConfig {
                    api_key: SecretString::from(key),
                    model: var("ESTIMATE_ADVICE_MODEL")
                        .unwrap_or_else(|| DEFAULT_ADVICE_MODEL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            advice,
            submit_delay,
        })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?} is not a whole number ({e})"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = IntakeConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.advice.is_none());
        assert_eq!(config.submit_delay, Duration::from_secs(2));
    }

    #[test]
    fn advice_enabled_by_key() {
        let config = IntakeConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("ESTIMATE_ADVICE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        let advice = config.advice.unwrap();
        assert_eq!(advice.api_key.expose_secret(), "secret");
        assert_eq!(advice.model, DEFAULT_ADVICE_MODEL);
        assert_eq!(advice.timeout, Duration::from_secs(5));
    }

    #[test]
    fn api_key_fallback_and_model_override() {
        let config = IntakeConfig::from_lookup(lookup(&[
            ("API_KEY", "other"),
            ("ESTIMATE_ADVICE_MODEL", "gemini-2.0-pro"),
            ("ESTIMATE_SUBMIT_DELAY_MS", "0"),
        ]))
        .unwrap();
        let advice = config.advice.unwrap();
        assert_eq!(advice.api_key.expose_secret(), "other");
        assert_eq!(advice.model, "gemini-2.0-pro");
        assert_eq!(config.submit_delay, Duration::ZERO);
    }

    #[test]
    fn blank_key_disables_advice() {
        let config = IntakeConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.advice.is_none());
    }

    #[test]
    fn bad_number_is_rejected() {
        let err = IntakeConfig::from_lookup(lookup(&[("ESTIMATE_SUBMIT_DELAY_MS", "soon")]))
            .unwrap_err();
        let ConfigError::InvalidValue { key, .. } = err;
        assert_eq!(key, "ESTIMATE_SUBMIT_DELAY_MS");
    }
}
