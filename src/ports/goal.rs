use crate::domain::Result;
use async_trait::async_trait;

use super::DockerClientPort;

/// Port for the action a step runs once its client is configured
#[async_trait]
pub trait GoalPort: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn execute(&self, client: &dyn DockerClientPort) -> Result<()>;
}
