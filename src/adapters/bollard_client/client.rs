use async_trait::async_trait;
use bollard::auth::DockerCredentials;
use bollard::errors::Error as BollardError;
use bollard::query_parameters::{PushImageOptionsBuilder, RemoveImageOptions, TagImageOptionsBuilder};
use bollard::Docker;
use futures::StreamExt;

use crate::domain::{AuthConfig, Result, StepError};
use crate::ports::{DockerClientPort, EngineVersion};

/// Docker client backed by bollard
pub struct BollardDockerClient {
    docker: Docker,
    credentials: Option<DockerCredentials>,
}

impl BollardDockerClient {
    pub fn new(docker: Docker, auth_config: Option<AuthConfig>) -> Self {
        Self {
            docker,
            credentials: auth_config.map(to_credentials),
        }
    }
}

fn to_credentials(auth: AuthConfig) -> DockerCredentials {
    DockerCredentials {
        username: Some(auth.username),
        password: Some(auth.password),
        email: Some(auth.email),
        serveraddress: Some(auth.server_address),
        ..Default::default()
    }
}

#[async_trait]
impl DockerClientPort for BollardDockerClient {
    async fn ping(&self) -> Result<()> {
        self.docker
            .ping()
            .await
            .map(|_| ())
            .map_err(|e| StepError::Connection(format!("Docker ping failed: {}", e)))
    }

    async fn version(&self) -> Result<EngineVersion> {
        let version = self
            .docker
            .version()
            .await
            .map_err(|e| StepError::Docker(format!("Cannot read daemon version: {}", e)))?;

        Ok(EngineVersion {
            version: version.version.unwrap_or_default(),
            api_version: version.api_version.unwrap_or_default(),
        })
    }

    async fn tag_image(&self, image: &str, repo: &str, tag: &str) -> Result<()> {
        let options = TagImageOptionsBuilder::default().repo(repo).tag(tag).build();

        self.docker
            .tag_image(image, Some(options))
            .await
            .map_err(|e| StepError::Docker(format!("Cannot tag {} as {}:{}: {}", image, repo, tag, e)))
    }

    async fn push_image(&self, image: &str, tag: &str) -> Result<()> {
        let options = PushImageOptionsBuilder::default().tag(tag).build();
        let mut stream = self.docker.push_image(image, Some(options), self.credentials.clone());

        while let Some(result) = stream.next().await {
            match result {
                Ok(info) => {
                    if let Some(status) = info.status {
                        log::debug!("push {}:{}: {}", image, tag, status);
                    }
                }
                Err(e) => {
                    return Err(StepError::Docker(format!("Cannot push {}:{}: {}", image, tag, e)));
                }
            }
        }

        Ok(())
    }

    async fn remove_image(&self, image: &str) -> Result<bool> {
        match self
            .docker
            .remove_image(image, None::<RemoveImageOptions>, self.credentials.clone())
            .await
        {
            Ok(deleted) => {
                log::debug!("removed {} ({} layer(s))", image, deleted.len());
                Ok(true)
            }
            Err(BollardError::DockerResponseServerError { status_code: 404, .. }) => Ok(false),
            Err(e) => Err(StepError::Docker(format!("Cannot remove {}: {}", image, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_credentials() {
        let credentials = to_credentials(AuthConfig {
            username: "username".into(),
            password: "password".into(),
            email: "user@host.domain".into(),
            server_address: "https://my.docker.reg".into(),
        });

        assert_eq!(credentials.username.as_deref(), Some("username"));
        assert_eq!(credentials.password.as_deref(), Some("password"));
        assert_eq!(credentials.email.as_deref(), Some("user@host.domain"));
        assert_eq!(credentials.serveraddress.as_deref(), Some("https://my.docker.reg"));
        assert!(credentials.identitytoken.is_none());
    }
}
