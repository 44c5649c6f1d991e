use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::SourceSpec;

pub mod defaults;
pub mod duration_serde;

use defaults::*;
use duration_serde::duration;

/// Run configuration, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_generator_name")]
    pub generator_name: String,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    /// Order decides first-seen precedence for duplicate channel ids
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_timeout", with = "duration")]
    pub timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_publish_repository")]
    pub repository: PathBuf,
    #[serde(default = "default_publish_remote")]
    pub remote: String,
    #[serde(default = "default_publish_branch")]
    pub branch: String,
    #[serde(default = "default_commit_message_prefix")]
    pub commit_message_prefix: String,
    /// Base of the public raw-file URL, logged after a successful push
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url_base: Option<String>,
    #[serde(default = "default_publish_timeout", with = "duration")]
    pub timeout: Duration,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_generator_name() -> String {
    DEFAULT_GENERATOR_NAME.to_string()
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_publish_repository() -> PathBuf {
    PathBuf::from(DEFAULT_PUBLISH_REPOSITORY)
}

fn default_publish_remote() -> String {
    DEFAULT_PUBLISH_REMOTE.to_string()
}

fn default_publish_branch() -> String {
    DEFAULT_PUBLISH_BRANCH.to_string()
}

fn default_commit_message_prefix() -> String {
    DEFAULT_COMMIT_MESSAGE_PREFIX.to_string()
}

fn default_publish_timeout() -> Duration {
    Duration::from_secs(DEFAULT_PUBLISH_TIMEOUT_SECS)
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            repository: default_publish_repository(),
            remote: default_publish_remote(),
            branch: default_publish_branch(),
            commit_message_prefix: default_commit_message_prefix(),
            raw_url_base: None,
            timeout: default_publish_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            generator_name: default_generator_name(),
            http: HttpConfig::default(),
            publish: PublishConfig::default(),
            sources: vec![SourceSpec::new(
                EXAMPLE_SOURCE_URL,
                EXAMPLE_SOURCE_OFFSET,
                Vec::new(),
            )],
        }
    }
}

/// True when `token` is a sign followed by exactly four ASCII digits
pub fn is_valid_offset(token: &str) -> bool {
    match token.as_bytes() {
        [sign, digits @ ..] if digits.len() == 4 => {
            matches!(sign, b'+' | b'-') && digits.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

impl Config {
    /// Parse the file at `config_file`, or write and return the default
    /// configuration when the file does not exist yet.
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> AppResult<Self> {
        let config_file = config_file.as_ref();

        if config_file.exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Self::from_toml_str(&contents).map_err(|e| {
                AppError::configuration(format!("{}: {}", config_file.display(), e))
            })
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config).map_err(|e| {
                AppError::internal(format!("Failed to serialize default config: {e}"))
            })?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file.display());
            Ok(default_config)
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(AppError::configuration("output_path must not be empty"));
        }

        if self.sources.is_empty() {
            return Err(AppError::configuration(
                "No EPG sources configured; add at least one [[sources]] entry",
            ));
        }

        for (index, source) in self.sources.iter().enumerate() {
            if source.url.trim().is_empty() {
                return Err(AppError::configuration(format!(
                    "sources[{index}]: url must not be empty"
                )));
            }
            if !is_valid_offset(&source.target_offset) {
                return Err(AppError::configuration(format!(
                    "sources[{index}] ({}): target_offset '{}' must look like +0000 or -0600",
                    source.display_name(),
                    source.target_offset
                )));
            }
        }

        if self.publish.enabled && self.publish.branch.trim().is_empty() {
            return Err(AppError::configuration("publish.branch must not be empty"));
        }

        Ok(())
    }
}
