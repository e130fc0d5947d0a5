use crate::domain::Result;
use async_trait::async_trait;

/// Daemon version as reported by the Docker engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineVersion {
    pub version: String,
    pub api_version: String,
}

/// Port for the Docker operations goals rely on
#[async_trait]
pub trait DockerClientPort: Send + Sync {
    /// Check that the daemon answers
    async fn ping(&self) -> Result<()>;

    async fn version(&self) -> Result<EngineVersion>;

    /// Tag `image` as `repo:tag`
    async fn tag_image(&self, image: &str, repo: &str, tag: &str) -> Result<()>;

    /// Push `image:tag` using the registry credentials the client was built with
    async fn push_image(&self, image: &str, tag: &str) -> Result<()>;

    /// Remove an image; returns false if the daemon does not know it
    async fn remove_image(&self, image: &str) -> Result<bool>;
}
