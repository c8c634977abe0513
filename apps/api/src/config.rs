use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Default request body cap: résumé uploads are small documents.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which `Enhancer` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancerMode {
    /// Lexical statistics only. No network, no credential.
    Local,
    /// Hosted model via the Anthropic API.
    Llm,
}

impl FromStr for EnhancerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(EnhancerMode::Local),
            "llm" => Ok(EnhancerMode::Llm),
            other => bail!("ENHANCER_MODE must be 'local' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is malformed, or if `llm` mode lacks an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: EnhancerMode,
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: Option<String>,
    pub lexicon_path: Option<PathBuf>,
    pub enhancer_seed: Option<u64>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = var("ENHANCER_MODE")
            .map(|v| v.parse::<EnhancerMode>())
            .transpose()?
            .unwrap_or(EnhancerMode::Local);

        let anthropic_api_key = var("ANTHROPIC_API_KEY");
        if mode == EnhancerMode::Llm && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (ENHANCER_MODE=llm)");
        }

        Ok(Config {
            mode,
            anthropic_api_key,
            anthropic_api_url: var("ANTHROPIC_API_URL"),
            lexicon_path: var("LEXICON_PATH").map(PathBuf::from),
            enhancer_seed: var("ENHANCER_SEED")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("ENHANCER_SEED must be an unsigned integer")?,
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_local_mode() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.mode, EnhancerMode::Local);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.anthropic_api_key.is_none());
        assert!(config.enhancer_seed.is_none());
    }

    #[test]
    fn test_llm_mode_requires_api_key() {
        let err = config_from(&[("ENHANCER_MODE", "llm")]).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));

        let config = config_from(&[("ENHANCER_MODE", "LLM"), ("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.mode, EnhancerMode::Llm);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let err = config_from(&[("ENHANCER_MODE", "llm"), ("ANTHROPIC_API_KEY", "  ")]).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_rejects_unknown_mode_and_bad_numbers() {
        assert!(config_from(&[("ENHANCER_MODE", "remote")]).is_err());
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("ENHANCER_SEED", "-1")]).is_err());
    }

    #[test]
    fn test_optional_settings_are_read() {
        let config = config_from(&[
            ("ENHANCER_SEED", "42"),
            ("LEXICON_PATH", "/etc/tailor/lexicon.json"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(config.enhancer_seed, Some(42));
        assert_eq!(
            config.lexicon_path,
            Some(PathBuf::from("/etc/tailor/lexicon.json"))
        );
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.port, 9000);
    }
}
