use std::path::PathBuf;

use bollard::{Docker, API_DEFAULT_VERSION};

use super::{BollardDockerClient, DockerEndpoint};
use crate::domain::{AuthConfig, DockerCertificates, Result, StepError};
use crate::ports::{ClientBuilderPort, DockerClientPort};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Builds bollard clients from host URI, certificates and registry credentials
#[derive(Debug, Clone)]
pub struct BollardClientBuilder {
    uri: Option<String>,
    certificates: Option<DockerCertificates>,
    auth_config: Option<AuthConfig>,
    timeout_secs: u64,
}

impl BollardClientBuilder {
    pub fn new() -> Self {
        Self {
            uri: None,
            certificates: None,
            auth_config: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Start from `DOCKER_HOST` and `DOCKER_CERT_PATH` when they are set
    pub fn from_env() -> Self {
        let mut builder = Self::new();

        if let Ok(host) = std::env::var("DOCKER_HOST") {
            if !host.is_empty() {
                builder.uri = Some(host);
            }
        }

        if let Ok(cert_path) = std::env::var("DOCKER_CERT_PATH") {
            match DockerCertificates::from_dir(&PathBuf::from(&cert_path)) {
                Ok(certificates) => builder.certificates = Some(certificates),
                Err(e) => log::debug!("Ignoring DOCKER_CERT_PATH: {}", e),
            }
        }

        builder
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn connect(&self) -> Result<Docker> {
        let uri = match &self.uri {
            Some(uri) => uri,
            None => {
                log::debug!("No Docker host configured, using local defaults");
                return Docker::connect_with_local_defaults()
                    .map_err(|e| StepError::Connection(format!("local daemon: {}", e)));
            }
        };

        let endpoint = DockerEndpoint::parse(uri, self.certificates.is_some())?;
        let docker = match (&endpoint, &self.certificates) {
            (DockerEndpoint::Unix(socket), _) => {
                Docker::connect_with_unix(socket, self.timeout_secs, API_DEFAULT_VERSION)
            }
            (DockerEndpoint::Tcp(addr), Some(certs)) => Docker::connect_with_ssl(
                &format!("tcp://{}", addr),
                &certs.client_key,
                &certs.client_cert,
                &certs.ca_cert,
                self.timeout_secs,
                API_DEFAULT_VERSION,
            ),
            (DockerEndpoint::Tcp(addr), None) => {
                Docker::connect_with_http(&format!("tcp://{}", addr), self.timeout_secs, API_DEFAULT_VERSION)
            }
        };

        log::debug!("Docker endpoint {:?} (tls: {})", endpoint, self.certificates.is_some());
        docker.map_err(|e| StepError::Connection(format!("{}: {}", uri, e)))
    }
}

impl Default for BollardClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilderPort for BollardClientBuilder {
    fn uri(&mut self, uri: &str) {
        self.uri = Some(uri.to_string());
    }

    fn docker_certificates(&mut self, certificates: DockerCertificates) {
        self.certificates = Some(certificates);
    }

    fn auth_config(&mut self, auth_config: AuthConfig) {
        self.auth_config = Some(auth_config);
    }

    fn build(&mut self) -> Result<Box<dyn DockerClientPort>> {
        let docker = self.connect()?;
        Ok(Box::new(BollardDockerClient::new(docker, self.auth_config.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/certs")
    }

    // Env vars are process-wide: every case touching them stays in this one test.
    #[test]
    fn test_from_env_defaults() {
        std::env::set_var("DOCKER_HOST", "");
        std::env::set_var("DOCKER_CERT_PATH", "/nonexistent/certs");
        let builder = BollardClientBuilder::from_env();
        assert!(builder.uri.is_none());
        assert!(builder.certificates.is_none());

        std::env::set_var("DOCKER_HOST", "tcp://docker.example.net:2376");
        std::env::set_var("DOCKER_CERT_PATH", cert_path());
        let mut builder = BollardClientBuilder::from_env();
        assert_eq!(builder.uri.as_deref(), Some("tcp://docker.example.net:2376"));
        assert_eq!(builder.certificates, Some(DockerCertificates::from_dir(&cert_path()).unwrap()));

        builder.uri("unix:///var/run/docker.sock");
        assert_eq!(builder.uri.as_deref(), Some("unix:///var/run/docker.sock"));

        std::env::remove_var("DOCKER_HOST");
        std::env::remove_var("DOCKER_CERT_PATH");
        let builder = BollardClientBuilder::from_env();
        assert!(builder.uri.is_none());
        assert!(builder.certificates.is_none());
    }

    #[test]
    fn test_builder_records_configuration() {
        let mut builder = BollardClientBuilder::new();
        builder.uri("tcp://127.0.0.1:2375");
        assert_eq!(builder.uri.as_deref(), Some("tcp://127.0.0.1:2375"));
        assert!(builder.certificates.is_none());
    }

    #[tokio::test]
    async fn test_build_plain_tcp_client() {
        let mut builder = BollardClientBuilder::new().with_timeout(5);
        builder.uri("testhost");
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_rejects_unsupported_scheme() {
        let mut builder = BollardClientBuilder::new();
        builder.uri("ssh://user@host");
        assert!(matches!(builder.build(), Err(StepError::InvalidConfig(_))));
    }
}
