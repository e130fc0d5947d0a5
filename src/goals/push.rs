use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use super::parse_image_ref;
use crate::domain::Result;
use crate::ports::{DockerClientPort, GoalPort};

pub const DEFAULT_RETRY_PUSH_COUNT: u32 = 5;
pub const DEFAULT_RETRY_PUSH_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub count: u32,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            count: DEFAULT_RETRY_PUSH_COUNT,
            timeout: DEFAULT_RETRY_PUSH_TIMEOUT,
        }
    }
}

/// Push `image:tag`, retrying failed attempts as the policy allows
pub async fn push_with_retry(client: &dyn DockerClientPort, image: &str, tag: &str, retry: RetryPolicy) -> Result<()> {
    let mut attempt = 0;

    loop {
        info!("Pushing {}:{}", image, tag);
        match client.push_image(image, tag).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < retry.count => {
                attempt += 1;
                warn!(
                    "Failed to push {}:{} ({}), retrying in {}ms ({}/{})",
                    image,
                    tag,
                    e,
                    retry.timeout.as_millis(),
                    attempt,
                    retry.count
                );
                sleep(retry.timeout).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Pushes an image to its registry
#[derive(Debug, Clone)]
pub struct PushGoal {
    image: String,
    retry: RetryPolicy,
}

impl PushGoal {
    pub fn new(image: &str, retry: RetryPolicy) -> Self {
        Self {
            image: image.to_string(),
            retry,
        }
    }
}

#[async_trait]
impl GoalPort for PushGoal {
    fn name(&self) -> &str {
        "push"
    }

    async fn execute(&self, client: &dyn DockerClientPort) -> Result<()> {
        let (name, tag) = parse_image_ref(&self.image);
        push_with_retry(client, name, tag, self.retry).await
    }
}
