use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::spelling::error::Result;
use crate::core::spelling::protocol::DEFAULT_LANGUAGE;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub scan: ScanConfig,
    pub demo: DemoConfig,
}

/// Remote spelling service endpoints and identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Spellcheck endpoint (POST).
    pub remote_url: String,
    /// Endpoint receiving "add to dictionary" word dumps (POST).
    pub user_suggestion_url: String,
    /// Availability check (GET).
    pub ping_url: String,
    pub service_renew_url: String,
    pub service_payment_url: String,
    pub contact_url: String,
    /// Upper bound for every remote call, in milliseconds.
    pub timeout_ms: u64,
    pub language: String,
    pub client_key: String,
    pub app_id: String,
    pub device_name: Option<String>,
}

/// Background scan pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Idle wait before a new pass is started after the previous one.
    pub waiting_time_ms: u64,
    /// Pause between two verified segments of a pass.
    pub elapsed_ms: u64,
}

/// Offline operation with the built-in demo dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub offline: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            remote_url: "http://127.0.0.1:8080/spelling".to_string(),
            user_suggestion_url: "http://127.0.0.1:8080/mutation".to_string(),
            ping_url: "http://127.0.0.1:8080/ping".to_string(),
            service_renew_url: "http://127.0.0.1:8080/renew".to_string(),
            service_payment_url: "http://127.0.0.1:8080/payment".to_string(),
            contact_url: "https://hijje.com/#/user/contact".to_string(),
            timeout_ms: 3000,
            language: DEFAULT_LANGUAGE.to_string(),
            client_key: "fontconversion-9998".to_string(),
            app_id: String::new(),
            device_name: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            waiting_time_ms: 200,
            elapsed_ms: 50,
        }
    }
}

impl ServiceConfig {
    /// Page to renew an expired or trial subscription.
    pub fn renew_url(&self) -> String {
        format!("{}/{}", self.service_renew_url.trim_end_matches('/'), self.app_id)
    }

    /// Registration/payment page for this device.
    pub fn payment_url(&self) -> String {
        let base = self.service_payment_url.trim_end_matches('/');
        match &self.device_name {
            Some(device) => format!("{}/{}/{}", base, device, self.app_id),
            None => format!("{}/{}", base, self.app_id),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/nepali-spell/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match Self::from_path(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(crate::core::spelling::error::SpellError::Io(_)) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse config at {}: {e}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("nepali-spell").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
