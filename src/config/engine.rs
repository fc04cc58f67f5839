//! Synthesis engine configuration

use serde::Deserialize;

use crate::domain::planning::SufficiencyVocabulary;

use super::error::ValidationError;

/// Tuning for synthesis, questioning and session storage
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Turns replayed into update prompts
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Oracle attempts per document, repairs included
    #[serde(default = "default_max_synthesis_attempts")]
    pub max_synthesis_attempts: u32,

    /// Question budget; defaults to 5, or 3 when strict
    pub max_questions: Option<u32>,

    /// Use the SUFFICIENT / NEED_MORE verdict vocabulary
    #[serde(default)]
    pub strict_sufficiency: bool,

    #[serde(default = "default_min_options")]
    pub min_options: usize,

    #[serde(default = "default_max_options")]
    pub max_options: usize,

    /// Live sessions per workspace
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl EngineConfig {
    /// The question budget after applying the strictness default
    pub fn max_questions(&self) -> u32 {
        self.max_questions
            .unwrap_or(if self.strict_sufficiency { 3 } else { 5 })
    }

    /// Most oracle calls one chat turn can make: a finalizing step asks for
    /// a verdict and a question before synthesizing the plan.
    pub fn max_oracle_calls_per_turn(&self) -> u64 {
        2 + u64::from(self.max_synthesis_attempts)
    }

    pub fn vocabulary(&self) -> SufficiencyVocabulary {
        if self.strict_sufficiency {
            SufficiencyVocabulary::Strict
        } else {
            SufficiencyVocabulary::Standard
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window == 0 {
            return Err(ValidationError::InvalidEngineSetting("history_window"));
        }
        if self.max_synthesis_attempts == 0 {
            return Err(ValidationError::InvalidEngineSetting(
                "max_synthesis_attempts",
            ));
        }
        if self.max_questions() == 0 {
            return Err(ValidationError::InvalidEngineSetting("max_questions"));
        }
        if self.min_options == 0 || self.min_options > self.max_options {
            return Err(ValidationError::InvalidEngineSetting("min_options"));
        }
        if self.max_sessions == 0 {
            return Err(ValidationError::InvalidEngineSetting("max_sessions"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            max_synthesis_attempts: default_max_synthesis_attempts(),
            max_questions: None,
            strict_sufficiency: false,
            min_options: default_min_options(),
            max_options: default_max_options(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_history_window() -> usize {
    6
}

fn default_max_synthesis_attempts() -> u32 {
    3
}

fn default_min_options() -> usize {
    3
}

fn default_max_options() -> usize {
    6
}

fn default_max_sessions() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_window, 6);
        assert_eq!(config.max_synthesis_attempts, 3);
        assert_eq!(config.max_questions(), 5);
        assert_eq!(config.vocabulary(), SufficiencyVocabulary::Standard);
        assert_eq!(config.min_options, 3);
        assert_eq!(config.max_options, 6);
        assert_eq!(config.max_sessions, 1024);
        assert_eq!(config.max_oracle_calls_per_turn(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_lowers_default_budget() {
        let config = EngineConfig {
            strict_sufficiency: true,
            ..Default::default()
        };
        assert_eq!(config.max_questions(), 3);
        assert_eq!(config.vocabulary(), SufficiencyVocabulary::Strict);
    }

    #[test]
    fn test_explicit_budget_wins() {
        let config = EngineConfig {
            strict_sufficiency: true,
            max_questions: Some(8),
            ..Default::default()
        };
        assert_eq!(config.max_questions(), 8);
    }

    #[test]
    fn test_validation_rejects_zero_settings() {
        let cases = [
            EngineConfig {
                history_window: 0,
                ..Default::default()
            },
            EngineConfig {
                max_synthesis_attempts: 0,
                ..Default::default()
            },
            EngineConfig {
                max_questions: Some(0),
                ..Default::default()
            },
            EngineConfig {
                max_sessions: 0,
                ..Default::default()
            },
            EngineConfig {
                min_options: 7,
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{:?} should be rejected", config);
        }
    }
}
