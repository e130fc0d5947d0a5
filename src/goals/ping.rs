use async_trait::async_trait;
use tracing::info;

use crate::domain::Result;
use crate::ports::{DockerClientPort, GoalPort};

/// Checks the daemon is reachable and reports its version
#[derive(Debug, Default)]
pub struct PingGoal;

#[async_trait]
impl GoalPort for PingGoal {
    fn name(&self) -> &str {
        "ping"
    }

    async fn execute(&self, client: &dyn DockerClientPort) -> Result<()> {
        client.ping().await?;
        let version = client.version().await?;
        info!("Docker daemon {} (API {})", version.version, version.api_version);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::testing::RecordingClient;

    #[tokio::test]
    async fn test_ping_then_version() {
        let client = RecordingClient::default();
        PingGoal.execute(&client).await.unwrap();
        assert_eq!(client.calls(), vec!["ping", "version"]);
    }
}
