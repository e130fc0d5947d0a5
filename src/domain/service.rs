use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use super::{AuthConfigResolver, DockerCertificates, Result, StepError, StepOptions};
use crate::ports::{ClientBuilderPort, GoalPort, SettingsPort};

/// Base of every goal: configures the Docker client, then runs the goal with it.
pub struct DockerStep {
    options: StepOptions,
    resolver: AuthConfigResolver,
    builder: Box<dyn ClientBuilderPort>,
}

impl DockerStep {
    pub fn new(options: StepOptions, settings: Arc<dyn SettingsPort>, builder: Box<dyn ClientBuilderPort>) -> Self {
        Self {
            options,
            resolver: AuthConfigResolver::new(settings),
            builder,
        }
    }

    pub fn options(&self) -> &StepOptions {
        &self.options
    }

    /// Run `goal` against a client built from this step's options.
    ///
    /// Every failure is reported as `StepError::Execution` carrying the cause.
    pub async fn execute(&mut self, goal: &dyn GoalPort) -> Result<()> {
        if self.options.skip {
            info!("Skipping {} goal", goal.name());
            return Ok(());
        }

        let span = tracing::info_span!("step", goal = goal.name(), id = %Uuid::new_v4());
        self.run(goal).instrument(span).await.map_err(StepError::execution)
    }

    async fn run(&mut self, goal: &dyn GoalPort) -> Result<()> {
        self.configure()?;

        let client = self.builder.build()?;
        goal.execute(client.as_ref()).await?;

        info!("{} goal done", goal.name());
        Ok(())
    }

    fn configure(&mut self) -> Result<()> {
        let connection = &self.options.connection;

        if let Some(host) = &connection.host {
            self.builder.uri(host);
        }

        if let Some(cert_path) = &connection.cert_path {
            let certificates = DockerCertificates::from_dir(cert_path)?;
            self.builder.docker_certificates(certificates);
        }

        let auth_config = self
            .resolver
            .resolve(self.options.server_id.as_deref(), self.options.registry_url.as_deref())?;
        if let Some(auth_config) = auth_config {
            self.builder.auth_config(auth_config);
        }

        Ok(())
    }
}
