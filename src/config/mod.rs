//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `PLAN_WEAVER`
//! prefix; nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use plan_weaver::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod engine;
mod error;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{CorsPolicy, Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Oracle provider configuration (Gemini/OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Synthesis and questioning settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `PLAN_WEAVER__*` variables.
    ///
    /// - `PLAN_WEAVER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PLAN_WEAVER__AI__PROVIDER=openai` -> `ai.provider = openai`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLAN_WEAVER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.engine.validate()?;

        let worst_case = self
            .ai
            .timeout_secs
            .saturating_mul(self.engine.max_oracle_calls_per_turn());
        if self.server.request_timeout_secs < worst_case {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PLAN_WEAVER__AI__GEMINI_API_KEY", "g-test-key");
    }

    fn clear_env() {
        env::remove_var("PLAN_WEAVER__AI__GEMINI_API_KEY");
        env::remove_var("PLAN_WEAVER__AI__OPENAI_API_KEY");
        env::remove_var("PLAN_WEAVER__AI__PROVIDER");
        env::remove_var("PLAN_WEAVER__SERVER__PORT");
        env::remove_var("PLAN_WEAVER__SERVER__ENVIRONMENT");
        env::remove_var("PLAN_WEAVER__ENGINE__STRICT_SUFFICIENCY");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Gemini);
        assert!(config.ai.has_gemini());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.engine.history_window, 6);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PLAN_WEAVER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_openai_provider_and_engine_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLAN_WEAVER__AI__PROVIDER", "openai");
        env::set_var("PLAN_WEAVER__AI__OPENAI_API_KEY", "sk-test");
        env::set_var("PLAN_WEAVER__SERVER__PORT", "3000");
        env::set_var("PLAN_WEAVER__ENGINE__STRICT_SUFFICIENCY", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::OpenAI);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.engine.max_questions(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_provider_key_fails_validation() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired(
                "PLAN_WEAVER__AI__GEMINI_API_KEY"
            ))
        );
    }

    #[test]
    fn test_request_timeout_must_cover_worst_case_turn() {
        let mut config = AppConfig::default();
        config.ai.gemini_api_key = Some(secrecy::Secret::new("g".to_string()));
        assert!(config.validate().is_ok());

        config.server.request_timeout_secs = 150;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));

        config.ai.timeout_secs = 30;
        assert!(config.validate().is_ok());

        config.engine.max_synthesis_attempts = 4;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
