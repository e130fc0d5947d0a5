pub mod errors;
pub mod models;
pub mod resolver;
pub mod service;

pub use errors::*;
pub use models::*;
pub use resolver::AuthConfigResolver;
pub use service::DockerStep;
