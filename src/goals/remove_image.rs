use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::Result;
use crate::ports::{DockerClientPort, GoalPort};

/// Removes an image and any extra tags of it
#[derive(Debug, Clone)]
pub struct RemoveImageGoal {
    image: String,
    tags: Vec<String>,
}

impl RemoveImageGoal {
    pub fn new(image: &str, tags: Vec<String>) -> Self {
        Self {
            image: image.to_string(),
            tags,
        }
    }

    fn references(&self) -> Vec<String> {
        if self.tags.is_empty() {
            return vec![self.image.clone()];
        }
        self.tags.iter().map(|tag| format!("{}:{}", self.image, tag)).collect()
    }
}

#[async_trait]
impl GoalPort for RemoveImageGoal {
    fn name(&self) -> &str {
        "remove-image"
    }

    async fn execute(&self, client: &dyn DockerClientPort) -> Result<()> {
        for reference in self.references() {
            if client.remove_image(&reference).await? {
                info!("Removed {}", reference);
            } else {
                warn!("Image {} does not exist, nothing to remove", reference);
            }
        }
        Ok(())
    }
}
