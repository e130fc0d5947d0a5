use crate::domain::{AuthConfig, DockerCertificates, Result};

use super::DockerClientPort;

/// Port for configuring a Docker client before it is handed to a goal
pub trait ClientBuilderPort: Send {
    /// Override the daemon URI
    fn uri(&mut self, uri: &str);

    /// Use TLS with the given client certificates
    fn docker_certificates(&mut self, certificates: DockerCertificates);

    /// Registry credentials for image operations
    fn auth_config(&mut self, auth_config: AuthConfig);

    /// Build the client from the accumulated configuration
    fn build(&mut self) -> Result<Box<dyn DockerClientPort>>;
}
