//! Application configuration.
//!
//! Values come from `DEBATE_*` environment variables layered over defaults;
//! CLI flags override them afterwards.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::agents::{LogicAnalystConfig, OpponentConfig};

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // Analysis settings
    /// Model for logic analysis and, unless overridden, the opponent.
    /// `None` uses the backend's default model.
    pub model: Option<String>,
    pub analysis_temperature: f64,
    pub analysis_max_tokens: u32,

    // Opponent settings
    pub opponent_model: Option<String>,
    pub opponent_temperature: f64,
    pub opponent_max_tokens: u32,

    // Storage
    /// SQLite file for training sessions; in-memory when unset.
    pub session_db: Option<PathBuf>,
    /// YAML question file; the built-in question when unset.
    pub tutorial_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: None,
            analysis_temperature: 0.7,
            analysis_max_tokens: 500,
            opponent_model: None,
            opponent_temperature: 0.7,
            opponent_max_tokens: 100,
            session_db: None,
            tutorial_file: None,
        }
    }
}

impl AppConfig {
    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DEBATE_MODEL`: Analysis model (default: the backend's model)
    /// - `DEBATE_ANALYSIS_TEMPERATURE`: Analysis temperature (default: 0.7)
    /// - `DEBATE_ANALYSIS_MAX_TOKENS`: Analysis token limit (default: 500)
    /// - `DEBATE_OPPONENT_MODEL`: Opponent model (default: same as `DEBATE_MODEL`)
    /// - `DEBATE_OPPONENT_TEMPERATURE`: Opponent temperature (default: 0.7)
    /// - `DEBATE_OPPONENT_MAX_TOKENS`: Opponent token limit (default: 100)
    /// - `DEBATE_SESSION_DB`: SQLite path for training sessions
    /// - `DEBATE_TUTORIAL_FILE`: YAML tutorial question file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("DEBATE_MODEL") {
            config.model = Some(val);
        }
        if let Some(val) = lookup("DEBATE_ANALYSIS_TEMPERATURE") {
            config.analysis_temperature = parse_env_value(&val, "DEBATE_ANALYSIS_TEMPERATURE")?;
        }
        if let Some(val) = lookup("DEBATE_ANALYSIS_MAX_TOKENS") {
            config.analysis_max_tokens = parse_env_value(&val, "DEBATE_ANALYSIS_MAX_TOKENS")?;
        }

        if let Some(val) = lookup("DEBATE_OPPONENT_MODEL") {
            config.opponent_model = Some(val);
        }
        if let Some(val) = lookup("DEBATE_OPPONENT_TEMPERATURE") {
            config.opponent_temperature = parse_env_value(&val, "DEBATE_OPPONENT_TEMPERATURE")?;
        }
        if let Some(val) = lookup("DEBATE_OPPONENT_MAX_TOKENS") {
            config.opponent_max_tokens = parse_env_value(&val, "DEBATE_OPPONENT_MAX_TOKENS")?;
        }

        if let Some(val) = lookup("DEBATE_SESSION_DB") {
            config.session_db = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("DEBATE_TUTORIAL_FILE") {
            config.tutorial_file = Some(PathBuf::from(val));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, model) in [("model", &self.model), ("opponent_model", &self.opponent_model)] {
            if matches!(model, Some(model) if model.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed(format!("{name} cannot be empty")));
            }
        }

        for (name, temperature) in [
            ("analysis_temperature", self.analysis_temperature),
            ("opponent_temperature", self.opponent_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} must be between 0.0 and 2.0"
                )));
            }
        }

        if self.analysis_max_tokens == 0 || self.opponent_max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder method to set the analysis model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_session_db(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_db = Some(path.into());
        self
    }

    pub fn analyst_config(&self) -> LogicAnalystConfig {
        LogicAnalystConfig::default()
            .with_model(self.model.clone().unwrap_or_default())
            .with_temperature(self.analysis_temperature)
            .with_max_tokens(self.analysis_max_tokens)
    }

    pub fn opponent_config(&self) -> OpponentConfig {
        OpponentConfig::default()
            .with_model(
                self.opponent_model
                    .clone()
                    .or_else(|| self.model.clone())
                    .unwrap_or_default(),
            )
            .with_temperature(self.opponent_temperature)
            .with_max_tokens(self.opponent_max_tokens)
    }
}

fn parse_env_value<T: FromStr>(value: &str, key: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.analysis_max_tokens, 500);
        assert_eq!(config.opponent_max_tokens, 100);
        assert!(config.opponent_config().model.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DEBATE_MODEL", "deepseek-reasoner"),
            ("DEBATE_ANALYSIS_TEMPERATURE", "0.2"),
            ("DEBATE_OPPONENT_MODEL", "gpt-4o-mini"),
            ("DEBATE_OPPONENT_MAX_TOKENS", " 80 "),
            ("DEBATE_SESSION_DB", "/tmp/sessions.db"),
        ]))
        .unwrap();

        assert_eq!(config.model.as_deref(), Some("deepseek-reasoner"));
        assert_eq!(config.analyst_config().model, "deepseek-reasoner");
        assert_eq!(config.analyst_config().temperature, 0.2);
        assert_eq!(config.opponent_config().model, "gpt-4o-mini");
        assert_eq!(config.opponent_config().max_tokens, 80);
        assert_eq!(config.session_db, Some(PathBuf::from("/tmp/sessions.db")));
    }

    #[test]
    fn test_invalid_number() {
        let err = AppConfig::from_lookup(lookup_from(&[("DEBATE_ANALYSIS_MAX_TOKENS", "lots")]))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "DEBATE_ANALYSIS_MAX_TOKENS")
        );
    }

    #[test]
    fn test_validation() {
        let err = AppConfig::from_lookup(lookup_from(&[("DEBATE_OPPONENT_TEMPERATURE", "3.5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed(_)));

        assert!(AppConfig::default().with_model("  ").validate().is_err());
        let mut config = AppConfig::default();
        config.analysis_max_tokens = 0;
        assert!(config.validate().is_err());
    }
}
