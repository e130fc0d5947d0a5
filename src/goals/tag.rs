use async_trait::async_trait;
use tracing::info;

use super::{parse_image_ref, push_with_retry, RetryPolicy};
use crate::domain::Result;
use crate::ports::{DockerClientPort, GoalPort};

/// Tags an image under a new name, optionally pushing the result
#[derive(Debug, Clone)]
pub struct TagGoal {
    image: String,
    new_name: String,
    push: Option<RetryPolicy>,
}

impl TagGoal {
    pub fn new(image: &str, new_name: &str) -> Self {
        Self {
            image: image.to_string(),
            new_name: new_name.to_string(),
            push: None,
        }
    }

    pub fn with_push(mut self, retry: RetryPolicy) -> Self {
        self.push = Some(retry);
        self
    }
}

#[async_trait]
impl GoalPort for TagGoal {
    fn name(&self) -> &str {
        "tag"
    }

    async fn execute(&self, client: &dyn DockerClientPort) -> Result<()> {
        let (repo, tag) = parse_image_ref(&self.new_name);

        info!("Tagging {} as {}:{}", self.image, repo, tag);
        client.tag_image(&self.image, repo, tag).await?;

        if let Some(retry) = self.push {
            push_with_retry(client, repo, tag, retry).await?;
        }
        Ok(())
    }
}
