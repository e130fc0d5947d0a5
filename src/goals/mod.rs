//! Goals run by a [`DockerStep`](crate::domain::DockerStep) once its client is configured.

mod ping;
mod push;
mod remove_image;
mod tag;

pub use ping::PingGoal;
pub use push::{push_with_retry, PushGoal, RetryPolicy};
pub use remove_image::RemoveImageGoal;
pub use tag::TagGoal;

/// Split an image reference into name and tag, defaulting the tag to `latest`
///
/// A `:` followed by a `/` belongs to a registry port, not a tag.
pub fn parse_image_ref(image: &str) -> (&str, &str) {
    if let Some((name, tag)) = image.rsplit_once(':') {
        if !tag.contains('/') {
            return (name, tag);
        }
    }

    (image, "latest")
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::domain::{Result, StepError};
    use crate::ports::{DockerClientPort, EngineVersion};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Client double recording every call, failing the first `push_failures` pushes
    #[derive(Default)]
    pub struct RecordingClient {
        pub calls: Mutex<Vec<String>>,
        pub push_failures: Mutex<usize>,
        pub missing_images: Vec<String>,
    }

    impl RecordingClient {
        pub fn failing_pushes(count: usize) -> Self {
            Self {
                push_failures: Mutex::new(count),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl DockerClientPort for RecordingClient {
        async fn ping(&self) -> Result<()> {
            self.record("ping".into());
            Ok(())
        }

        async fn version(&self) -> Result<EngineVersion> {
            self.record("version".into());
            Ok(EngineVersion {
                version: "24.0.7".into(),
                api_version: "1.43".into(),
            })
        }

        async fn tag_image(&self, image: &str, repo: &str, tag: &str) -> Result<()> {
            self.record(format!("tag {} {}:{}", image, repo, tag));
            Ok(())
        }

        async fn push_image(&self, image: &str, tag: &str) -> Result<()> {
            self.record(format!("push {}:{}", image, tag));
            let mut failures = self.push_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(StepError::Docker("registry unavailable".into()));
            }
            Ok(())
        }

        async fn remove_image(&self, image: &str) -> Result<bool> {
            self.record(format!("remove {}", image));
            Ok(!self.missing_images.iter().any(|m| m == image))
        }
    }
}
