pub mod bollard_client;
pub mod settings;

pub use bollard_client::{BollardClientBuilder, BollardDockerClient, DockerEndpoint};
pub use settings::{SettingsFile, SettingsStore};
