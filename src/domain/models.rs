use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Result, StepError};

pub const DEFAULT_REGISTRY: &str = "https://index.docker.io/v1/";

pub const CA_CERT_NAME: &str = "ca.pem";
pub const CLIENT_CERT_NAME: &str = "cert.pem";
pub const CLIENT_KEY_NAME: &str = "key.pem";

/// Where the Docker daemon lives and how to reach it over TLS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub cert_path: Option<PathBuf>,
}

impl ConnectionConfig {
    pub fn new(host: Option<String>, cert_path: Option<PathBuf>) -> Self {
        Self { host, cert_path }
    }
}

/// Structured block attached to a server credential, e.g. `{ email = "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationBlock {
    children: HashMap<String, String>,
}

impl ConfigurationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_child(mut self, name: &str, value: &str) -> Self {
        self.children.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(&self, name: &str) -> Option<&str> {
        self.children.get(name).map(String::as_str)
    }
}

/// Named credential entry of the settings store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCredential {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub configuration: Option<ConfigurationBlock>,
}

impl ServerCredential {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn with_configuration(mut self, configuration: ConfigurationBlock) -> Self {
        self.configuration = Some(configuration);
        self
    }
}

/// Registry authentication handed to the Docker client.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub email: String,
    pub server_address: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("email", &self.email)
            .field("server_address", &self.server_address)
            .finish()
    }
}

/// Client TLS material found in a Docker certificate directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerCertificates {
    pub ca_cert: PathBuf,
    pub client_cert: PathBuf,
    pub client_key: PathBuf,
}

impl DockerCertificates {
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let certs = Self {
            ca_cert: dir.join(CA_CERT_NAME),
            client_cert: dir.join(CLIENT_CERT_NAME),
            client_key: dir.join(CLIENT_KEY_NAME),
        };

        for file in [&certs.ca_cert, &certs.client_cert, &certs.client_key] {
            if !file.is_file() {
                return Err(StepError::Certificate(format!(
                    "{} not found in {}",
                    file.display(),
                    dir.display()
                )));
            }
        }

        Ok(certs)
    }
}

/// Everything a step needs besides its collaborators.
#[derive(Debug, Clone, Default)]
pub struct StepOptions {
    pub connection: ConnectionConfig,
    pub server_id: Option<String>,
    pub registry_url: Option<String>,
    pub skip: bool,
}
