//! Step configuration.
//!
//! Values come from a TOML file loaded with confy (`~/.config/dockstep/dockstep.toml`
//! unless `--config` points elsewhere) and are then overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ConnectionConfig, Result, StepError, StepOptions};
use crate::goals::RetryPolicy;

const APP_NAME: &str = "dockstep";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub docker_host: Option<String>,
    pub docker_cert_path: Option<PathBuf>,
    /// Id of the settings entry holding the registry credentials
    pub server_id: Option<String>,
    pub registry_url: Option<String>,
    pub skip_docker: bool,
    pub settings_path: Option<PathBuf>,
    pub retry_push_count: u32,
    pub retry_push_timeout_ms: u64,
}

impl Default for StepConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            docker_host: None,
            docker_cert_path: None,
            server_id: None,
            registry_url: None,
            skip_docker: false,
            settings_path: None,
            retry_push_count: retry.count,
            retry_push_timeout_ms: retry.timeout.as_millis() as u64,
        }
    }
}

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub docker_host: Option<String>,
    pub docker_cert_path: Option<PathBuf>,
    pub server_id: Option<String>,
    pub registry_url: Option<String>,
    pub skip_docker: bool,
    pub settings_path: Option<PathBuf>,
    pub retry_push_count: Option<u32>,
    pub retry_push_timeout_ms: Option<u64>,
}

impl StepConfig {
    /// Load from `path`, or from the default confy location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let loaded = match path {
            Some(path) if !path.exists() => {
                return Err(StepError::InvalidConfig(format!("{} does not exist", path.display())))
            }
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, Some(APP_NAME)),
        };

        loaded.map_err(|e| StepError::InvalidConfig(format!("Cannot load configuration: {}", e)))
    }

    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.docker_host.is_some() {
            self.docker_host = overrides.docker_host;
        }
        if overrides.docker_cert_path.is_some() {
            self.docker_cert_path = overrides.docker_cert_path;
        }
        if overrides.server_id.is_some() {
            self.server_id = overrides.server_id;
        }
        if overrides.registry_url.is_some() {
            self.registry_url = overrides.registry_url;
        }
        if overrides.settings_path.is_some() {
            self.settings_path = overrides.settings_path;
        }
        self.skip_docker |= overrides.skip_docker;
        if let Some(count) = overrides.retry_push_count {
            self.retry_push_count = count;
        }
        if let Some(timeout) = overrides.retry_push_timeout_ms {
            self.retry_push_timeout_ms = timeout;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(registry_url) = &self.registry_url {
            Url::parse(registry_url)
                .map_err(|e| StepError::InvalidConfig(format!("Invalid registry URL {}: {}", registry_url, e)))?;
        }
        if let Some(host) = &self.docker_host {
            if host.trim().is_empty() {
                return Err(StepError::InvalidConfig("Docker host is empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn step_options(&self) -> StepOptions {
        StepOptions {
            connection: ConnectionConfig::new(self.docker_host.clone(), self.docker_cert_path.clone()),
            server_id: self.server_id.clone(),
            registry_url: self.registry_url.clone(),
            skip: self.skip_docker,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            count: self.retry_push_count,
            timeout: Duration::from_millis(self.retry_push_timeout_ms),
        }
    }
}
