use crate::adapters::openrouter::{DEFAULT_MODEL, DEFAULT_OPENROUTER_URL};
use crate::adapters::serper::DEFAULT_SERPER_URL;
use crate::config::{
    validate_provider, DEFAULT_BIND_ADDR, DEFAULT_MAX_RESULTS, DEFAULT_REQUEST_TIMEOUT_SECONDS,
    DEFAULT_SNIPPET_MAX_CHARS, DEFAULT_TEMPERATURE,
};
use crate::core::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub search: Option<SearchConfig>,
    pub model: Option<ModelConfig>,
    pub http: Option<HttpConfig>,
    #[serde(skip)]
    defaults: Defaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: Option<String>,
    pub service_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: Option<String>,
    pub max_results: Option<usize>,
    pub snippet_max_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub endpoint: Option<String>,
    pub name: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone)]
struct Defaults {
    bind_addr: String,
    serper_url: String,
    openrouter_url: String,
    model: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            serper_url: DEFAULT_SERPER_URL.to_string(),
            openrouter_url: DEFAULT_OPENROUTER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SERVICE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 檔案沒有設定 service_secret 時，改用命令列或環境變數提供的值
    pub fn with_service_secret_fallback(mut self, secret: Option<String>) -> Self {
        let missing = self
            .server
            .service_secret
            .as_deref()
            .map(|s| s.trim().is_empty() || s.starts_with("${"))
            .unwrap_or(true);
        if missing {
            if let Some(secret) = secret {
                self.server.service_secret = Some(secret);
            }
        }
        self
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let secret = crate::utils::validation::validate_required_field(
            "server.service_secret",
            &self.server.service_secret,
        )?;
        if secret.starts_with("${") {
            return Err(GatewayError::MissingConfigError {
                field: format!("server.service_secret (unresolved {})", secret),
            });
        }
        validate_provider(self)
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_addr(&self) -> &str {
        self.server
            .bind_addr
            .as_deref()
            .unwrap_or(&self.defaults.bind_addr)
    }

    fn service_secret(&self) -> &str {
        self.server.service_secret.as_deref().unwrap_or("")
    }

    fn serper_url(&self) -> &str {
        self.search
            .as_ref()
            .and_then(|s| s.endpoint.as_deref())
            .unwrap_or(&self.defaults.serper_url)
    }

    fn openrouter_url(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.endpoint.as_deref())
            .unwrap_or(&self.defaults.openrouter_url)
    }

    fn model(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .unwrap_or(&self.defaults.model)
    }

    fn max_results(&self) -> usize {
        self.search
            .as_ref()
            .and_then(|s| s.max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }

    fn snippet_max_chars(&self) -> usize {
        self.search
            .as_ref()
            .and_then(|s| s.snippet_max_chars)
            .unwrap_or(DEFAULT_SNIPPET_MAX_CHARS)
    }

    fn temperature(&self) -> f32 {
        self.model
            .as_ref()
            .and_then(|m| m.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.http
            .as_ref()
            .and_then(|h| h.request_timeout_seconds)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"
service_secret = "s3cret"

[search]
endpoint = "https://serper.internal/search"
max_results = 5
snippet_max_chars = 120

[model]
endpoint = "https://openrouter.internal/api/v1"
name = "anthropic/claude-3.5-haiku"
temperature = 0.0

[http]
request_timeout_seconds = 30
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.service_secret(), "s3cret");
        assert_eq!(config.serper_url(), "https://serper.internal/search");
        assert_eq!(config.model(), "anthropic/claude-3.5-haiku");
        assert_eq!(config.max_results(), 5);
        assert_eq!(config.snippet_max_chars(), 120);
        assert_eq!(config.request_timeout_seconds(), 30);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
service_secret = "s3cret"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(config.serper_url(), DEFAULT_SERPER_URL);
        assert_eq!(config.openrouter_url(), DEFAULT_OPENROUTER_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.max_results(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DSG_TEST_SECRET", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[server]
service_secret = "${DSG_TEST_SECRET}"
"#,
        )
        .unwrap();
        assert_eq!(config.service_secret(), "from-env");

        std::env::remove_var("DSG_TEST_SECRET");
    }

    #[test]
    fn test_unresolved_secret_is_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
service_secret = "${DSG_TEST_NEVER_SET}"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(GatewayError::MissingConfigError { .. })
        ));

        let config = config.with_service_secret_fallback(Some("cli-secret".to_string()));
        assert_eq!(config.service_secret(), "cli-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
service_secret = "s3cret"

[search]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[server]
service_secret = "s3cret"

[model]
temperature = 3.5
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:8123"
service_secret = "file-secret"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8123");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, GatewayError::IoError(_)));
    }
}
