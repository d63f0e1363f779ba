//! Application settings configuration
//!
//! Defines network timeouts, the redirect cap, batch pool sizing and the
//! public suffix list source.

use crate::batch::RetryPolicy;
use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PUBLIC_SUFFIX_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Outbound network settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Timeout applied to every HTTP request, TCP dial and TLS handshake
    pub timeout_secs: u64,
    /// Maximum number of redirects followed from one starting URL
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 3,
            user_agent: concat!("hsts-preload/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NetworkSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Batch worker pool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub workers: usize,
    pub retry: RetryPolicy,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            workers: 100,
            retry: RetryPolicy::Never,
        }
    }
}

/// Where the public suffix list comes from
#[derive(Debug, Clone, Deserialize)]
pub struct PublicSuffixSettings {
    /// Local copy of `public_suffix_list.dat`; downloaded from `url` when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_public_suffix_url")]
    pub url: String,
}

fn default_public_suffix_url() -> String {
    DEFAULT_PUBLIC_SUFFIX_URL.to_string()
}

impl Default for PublicSuffixSettings {
    fn default() -> Self {
        Self {
            path: None,
            url: default_public_suffix_url(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub batch: BatchSettings,
    #[serde(default)]
    pub public_suffix: PublicSuffixSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.network.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "network.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.batch.workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch.workers".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
