pub mod toml_config;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// 兩種設定來源共用的檢查
pub(crate) fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_socket_addr("bind_addr", config.bind_addr())?;
    validation::validate_non_empty_string("service_secret", config.service_secret())?;
    validation::validate_url("serper_url", config.serper_url())?;
    validation::validate_url("openrouter_url", config.openrouter_url())?;
    validation::validate_non_empty_string("model", config.model())?;
    validation::validate_range("max_results", config.max_results(), 1, 100)?;
    validation::validate_positive_number("snippet_max_chars", config.snippet_max_chars(), 1)?;
    validation::validate_finite("temperature", config.temperature())?;
    validation::validate_range("temperature", config.temperature(), 0.0, 2.0)?;
    validation::validate_range(
        "request_timeout_seconds",
        config.request_timeout_seconds(),
        1,
        600,
    )?;
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::adapters::openrouter::{DEFAULT_MODEL, DEFAULT_OPENROUTER_URL};
    use crate::adapters::serper::DEFAULT_SERPER_URL;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "deepsearch-gateway")]
    #[command(about = "HTTP gateway for a web-search answering agent")]
    pub struct CliConfig {
        /// Path to a TOML configuration file (overrides the flags below)
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
        pub bind_addr: String,

        /// Shared secret expected in the x-api-key header
        #[arg(long, env = "SERVICE_API_KEY", hide_env_values = true)]
        pub service_secret: Option<String>,

        #[arg(long, env = "SERPER_URL", default_value = DEFAULT_SERPER_URL)]
        pub serper_url: String,

        #[arg(long, env = "OPENROUTER_URL", default_value = DEFAULT_OPENROUTER_URL)]
        pub openrouter_url: String,

        /// OpenRouter model id
        #[arg(long, env = "MODEL_NAME", default_value = DEFAULT_MODEL)]
        pub model: String,

        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        pub max_results: usize,

        #[arg(long, default_value_t = DEFAULT_SNIPPET_MAX_CHARS)]
        pub snippet_max_chars: usize,

        #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
        pub temperature: f32,

        /// Timeout for each upstream provider call, in seconds
        #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
        pub request_timeout: u64,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn bind_addr(&self) -> &str {
            &self.bind_addr
        }

        fn service_secret(&self) -> &str {
            self.service_secret.as_deref().unwrap_or("")
        }

        fn serper_url(&self) -> &str {
            &self.serper_url
        }

        fn openrouter_url(&self) -> &str {
            &self.openrouter_url
        }

        fn model(&self) -> &str {
            &self.model
        }

        fn max_results(&self) -> usize {
            self.max_results
        }

        fn snippet_max_chars(&self) -> usize {
            self.snippet_max_chars
        }

        fn temperature(&self) -> f32 {
            self.temperature
        }

        fn request_timeout_seconds(&self) -> u64 {
            self.request_timeout
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_required_field("service_secret", &self.service_secret)?;
            validate_provider(self)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config =
                CliConfig::try_parse_from(["deepsearch-gateway", "--service-secret", "s3cret"])
                    .unwrap();
            assert_eq!(config.serper_url(), DEFAULT_SERPER_URL);
            assert_eq!(config.model(), DEFAULT_MODEL);
            assert_eq!(config.max_results(), DEFAULT_MAX_RESULTS);
            assert!(config.config.is_none());
        }

        #[test]
        fn test_validation_rejects_bad_values() {
            let config = CliConfig::try_parse_from([
                "deepsearch-gateway",
                "--service-secret",
                "s3cret",
                "--max-results",
                "0",
            ])
            .unwrap();
            assert!(config.validate().is_err());

            let config = CliConfig::try_parse_from([
                "deepsearch-gateway",
                "--service-secret",
                "s3cret",
                "--openrouter-url",
                "not a url",
            ])
            .unwrap();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validation_rejects_nan_temperature() {
            let config = CliConfig::try_parse_from([
                "deepsearch-gateway",
                "--service-secret",
                "s3cret",
                "--temperature",
                "NaN",
            ])
            .unwrap();
            assert!(config.temperature().is_nan());
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_bind_addr_flag() {
            let config = CliConfig::try_parse_from([
                "deepsearch-gateway",
                "--service-secret",
                "s3cret",
                "--bind-addr",
                "127.0.0.1:9001",
            ])
            .unwrap();
            assert_eq!(config.bind_addr(), "127.0.0.1:9001");
            assert!(config.validate().is_ok());
        }
    }
}
