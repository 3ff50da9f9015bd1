use crate::core::contact_form::{FormLimits, DEFAULT_RELAY_TIMEOUT};
use crate::core::site::DEFAULT_SPLASH;
use crate::core::ConfigProvider;
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    pub relay: Option<RelayConfig>,
    pub contact: Option<ContactConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSection {
    pub content_path: Option<String>,
    pub loading_screen_ms: Option<u64>,
    pub theme_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    pub min_message_chars: Option<usize>,
    pub max_message_chars: Option<usize>,
    pub enforce_max_message: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub json: Option<bool>,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortfolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PortfolioError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMAILJS_PUBLIC_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.site.content_path {
            validate_path("site.content_path", path)?;
        }
        if let Some(dir) = &self.site.theme_dir {
            validate_path("site.theme_dir", dir)?;
        }

        if let Some(relay) = &self.relay {
            validate_url("relay.endpoint", &relay.endpoint)?;
            let credentials = [
                ("relay.service_id", &relay.service_id),
                ("relay.template_id", &relay.template_id),
                ("relay.public_key", &relay.public_key),
            ];
            for (field, value) in credentials {
                validate_non_empty_string(field, value)?;
                if value.contains("${") {
                    return Err(PortfolioError::InvalidConfigValueError {
                        field: field.to_string(),
                        value: value.clone(),
                        reason: "Unresolved environment variable".to_string(),
                    });
                }
            }
            if let Some(timeout) = relay.timeout_seconds {
                validate_positive_number("relay.timeout_seconds", timeout, 1)?;
            }
        }

        let limits = self.form_limits();
        validate_positive_number("contact.min_message_chars", limits.min_message_chars as u64, 1)?;
        if limits.max_message_chars < limits.min_message_chars {
            return Err(PortfolioError::InvalidConfigValueError {
                field: "contact.max_message_chars".to_string(),
                value: limits.max_message_chars.to_string(),
                reason: format!(
                    "Must not be below contact.min_message_chars ({})",
                    limits.min_message_chars
                ),
            });
        }

        Ok(())
    }

    pub fn form_limits(&self) -> FormLimits {
        let defaults = FormLimits::default();
        match &self.contact {
            Some(contact) => FormLimits {
                min_message_chars: contact.min_message_chars.unwrap_or(defaults.min_message_chars),
                max_message_chars: contact.max_message_chars.unwrap_or(defaults.max_message_chars),
                enforce_max_message: contact
                    .enforce_max_message
                    .unwrap_or(defaults.enforce_max_message),
            },
            None => defaults,
        }
    }

    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_seconds())
    }

    pub fn theme_dir(&self) -> &str {
        self.site.theme_dir.as_deref().unwrap_or("./.portfolio")
    }

    pub fn log_level(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring.as_ref().and_then(|m| m.json).unwrap_or(false)
    }
}

impl ConfigProvider for SiteConfig {
    fn content_path(&self) -> Option<&str> {
        self.site.content_path.as_deref()
    }

    fn loading_screen_ms(&self) -> u64 {
        self.site
            .loading_screen_ms
            .unwrap_or(DEFAULT_SPLASH.as_millis() as u64)
    }

    fn relay_timeout_seconds(&self) -> u64 {
        self.relay
            .as_ref()
            .and_then(|r| r.timeout_seconds)
            .unwrap_or(DEFAULT_RELAY_TIMEOUT.as_secs())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
