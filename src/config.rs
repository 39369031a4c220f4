//! Configuration loaded from environment variables.
//!
//! ## Variables
//!
//! ```bash
//! export ALLOWED_ORIGINS="https://app.example.com,https://*.vercel.app"
//! export RUST_LOG="info"
//! export LOG_FORMAT="text"          # or "json"
//! export MAX_INPUT_BYTES="1048576"
//! ```
//!
//! All variables are optional:
//!
//! - `ALLOWED_ORIGINS` - Comma-separated origin allow-list (default: empty)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `MAX_INPUT_BYTES` - Largest input value accepted by the CLI
//!   (default: 1 MiB, max: 16 MiB)

use anyhow::{Context, Result};
use std::env;

const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;
const MAX_INPUT_BYTES_LIMIT: usize = 16 * 1024 * 1024;

/// Settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origins accepted by [`crate::sanitize::validate_request_origin`].
    pub allowed_origins: Vec<String>,
    pub log_level: String,
    pub log_format: String,
    pub max_input_bytes: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `MAX_INPUT_BYTES` is set but is not a number.
    pub fn from_env() -> Result<Self> {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origin_list(&v))
            .unwrap_or_default();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let max_input_bytes = match env::var("MAX_INPUT_BYTES") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("MAX_INPUT_BYTES must be a number, got '{v}'"))?,
            Err(_) => DEFAULT_MAX_INPUT_BYTES,
        };

        Ok(Self {
            allowed_origins,
            log_level,
            log_format,
            max_input_bytes,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `max_input_bytes` is 0 or above 16 MiB
    /// - an allowed origin contains more than one `*`
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.max_input_bytes == 0 || self.max_input_bytes > MAX_INPUT_BYTES_LIMIT {
            anyhow::bail!(
                "MAX_INPUT_BYTES must be between 1 and {}, got {}",
                MAX_INPUT_BYTES_LIMIT,
                self.max_input_bytes
            );
        }

        if let Some(origin) = self
            .allowed_origins
            .iter()
            .find(|o| o.matches('*').count() > 1)
        {
            anyhow::bail!(
                "ALLOWED_ORIGINS entries may contain at most one '*', got '{}'",
                origin
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        if self.allowed_origins.is_empty() {
            tracing::info!("  Allowed origins: none");
        } else {
            tracing::info!("  Allowed origins: {}", self.allowed_origins.join(", "));
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Max input bytes: {}", self.max_input_bytes);
    }
}

/// Splits a comma-separated list, dropping blanks and surrounding spaces.
fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config() -> Config {
        Config {
            allowed_origins: vec!["https://example.com".to_string()],
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    #[test]
    fn test_parse_origin_list() {
        assert_eq!(
            parse_origin_list(" https://a.com , ,https://*.b.app,"),
            vec!["https://a.com".to_string(), "https://*.b.app".to_string()]
        );
        assert!(parse_origin_list("").is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();
        assert!(config.validate().is_ok());

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.max_input_bytes = 0;
        assert!(config.validate().is_err());
        config.max_input_bytes = MAX_INPUT_BYTES_LIMIT + 1;
        assert!(config.validate().is_err());
        config.max_input_bytes = MAX_INPUT_BYTES_LIMIT;
        assert!(config.validate().is_ok());

        config.allowed_origins.push("https://*.*.app".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("ALLOWED_ORIGINS");
            env::remove_var("RUST_LOG");
            env::remove_var("LOG_FORMAT");
            env::remove_var("MAX_INPUT_BYTES");
        }

        let config = Config::from_env().unwrap();
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    #[serial]
    fn test_from_env_values() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("ALLOWED_ORIGINS", "https://app.example.com,https://*.vercel.app");
            env::set_var("MAX_INPUT_BYTES", "4096");
        }

        let config = load_from_env().unwrap();
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.max_input_bytes, 4096);

        // Cleanup
        unsafe {
            env::remove_var("ALLOWED_ORIGINS");
            env::remove_var("MAX_INPUT_BYTES");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_limit() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("MAX_INPUT_BYTES", "lots");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("MAX_INPUT_BYTES");
        }
    }
}
