use crate::domain::{Result, StepError};
use url::Url;

const DOCKER_PORT: u16 = 2375;
const DOCKER_TLS_PORT: u16 = 2376;

/// Transport a Docker host URI points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    /// Full `unix://` URI of the daemon socket
    Unix(String),
    /// `host:port` of a daemon listening on TCP
    Tcp(String),
}

impl DockerEndpoint {
    /// Classify a host URI; a bare `host[:port]` is taken as TCP
    pub fn parse(uri: &str, tls: bool) -> Result<Self> {
        let normalized = if uri.contains("://") {
            uri.to_string()
        } else {
            format!("tcp://{}", uri)
        };

        let url = Url::parse(&normalized)
            .map_err(|e| StepError::InvalidConfig(format!("Invalid Docker host {}: {}", uri, e)))?;

        match url.scheme() {
            "unix" => Ok(DockerEndpoint::Unix(normalized)),
            "https" if !tls => Err(StepError::InvalidConfig(format!(
                "Docker host {} uses https but no certificates are configured",
                uri
            ))),
            "tcp" | "http" | "https" => {
                let host = url
                    .host_str()
                    .ok_or_else(|| StepError::InvalidConfig(format!("Missing host in Docker host {}", uri)))?;
                let default_port = if tls { DOCKER_TLS_PORT } else { DOCKER_PORT };
                let port = match url.scheme() {
                    "tcp" => url.port().unwrap_or(default_port),
                    _ => url.port_or_known_default().unwrap_or(default_port),
                };
                Ok(DockerEndpoint::Tcp(format!("{}:{}", host, port)))
            }
            scheme => Err(StepError::InvalidConfig(format!(
                "Unsupported Docker host scheme: {}",
                scheme
            ))),
        }
    }
}
