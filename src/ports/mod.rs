pub mod client_builder;
pub mod docker_client;
pub mod goal;
pub mod settings;

pub use client_builder::ClientBuilderPort;
pub use docker_client::{DockerClientPort, EngineVersion};
pub use goal::GoalPort;
pub use settings::SettingsPort;
