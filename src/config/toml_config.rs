use super::site_url::{resolve_build_time, resolve_site_url, LOCAL_SITE_URL};
use super::OUTPUT_FORMATS;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_choices, validate_non_empty_string, validate_path, validate_site_url, Validate,
};
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSection {
    pub name: Option<String>,
    pub url: Option<String>,
    pub build_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    pub pages: Option<bool>,
    pub archive: Option<ArchiveConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，`${VAR}` 會先以環境變數替換
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content, |name| std::env::var(name).ok());

        toml::from_str(&processed).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 將站點網址與建置時間定下來；未設定的欄位依序取環境變數
    pub fn resolve(mut self) -> Result<Self> {
        if let Some(url) = &self.site.url {
            if let Some(caps) = ENV_VAR_PATTERN.captures(url) {
                return Err(SiteError::MissingConfigError {
                    field: caps[1].to_string(),
                });
            }
        }

        self.site.url = Some(resolve_site_url(self.site.url.as_deref()));
        self.site.build_time = Some(resolve_build_time(self.site.build_time)?);
        Ok(self)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_site_url("site.url", self.site_url())?;
        validate_path("output.path", &self.output.path)?;
        validate_choices("output.formats", &self.output.formats, OUTPUT_FORMATS)?;

        if let Some(name) = &self.site.name {
            validate_non_empty_string("site.name", name)?;
        }

        if let Some(archive) = self.output.archive.as_ref().filter(|a| a.enabled) {
            if !archive.filename.ends_with(".zip") || archive.filename.contains('/') {
                return Err(SiteError::InvalidConfigValueError {
                    field: "output.archive.filename".to_string(),
                    value: archive.filename.clone(),
                    reason: "must be a plain file name ending in .zip".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().map(|l| l.verbose).unwrap_or(false)
    }
}

/// 未設定的變數保留原樣，交給 [`SiteConfig::resolve`] 回報
fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &Captures| {
            let name = &caps[1];
            lookup(name).unwrap_or_else(|| format!("${{{}}}", name))
        })
        .into_owned()
}

impl ConfigProvider for SiteConfig {
    fn site_url(&self) -> &str {
        self.site.url.as_deref().unwrap_or(LOCAL_SITE_URL)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn build_time(&self) -> DateTime<Utc> {
        self.site.build_time.unwrap_or_else(Utc::now)
    }

    fn write_csv(&self) -> bool {
        self.output.formats.iter().any(|format| format == "csv")
    }

    fn write_pages(&self) -> bool {
        self.output.pages.unwrap_or(true)
    }

    fn archive_filename(&self) -> Option<&str> {
        self.output
            .archive
            .as_ref()
            .filter(|archive| archive.enabled)
            .map(|archive| archive.filename.as_str())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
