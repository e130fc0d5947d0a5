mod builder;
mod client;
mod endpoint;

pub use builder::BollardClientBuilder;
pub use client::BollardDockerClient;
pub use endpoint::DockerEndpoint;
