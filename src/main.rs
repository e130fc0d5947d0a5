use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use dockstep::adapters::{BollardClientBuilder, SettingsStore};
use dockstep::config::{ConfigOverrides, StepConfig};
use dockstep::domain::{DockerStep, Result};
use dockstep::goals::{PingGoal, PushGoal, RemoveImageGoal, TagGoal};
use dockstep::ports::GoalPort;

#[derive(Parser, Debug)]
#[clap(version = env!("DOCKSTEP_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
pub struct Opts {
    /// Configuration file (defaults to the user config directory)
    #[clap(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Settings file holding registry server credentials
    #[clap(long, short = 's', global = true)]
    settings: Option<PathBuf>,

    /// Docker daemon URI (unix://, tcp:// or host[:port])
    #[clap(long, short = 'H', global = true)]
    docker_host: Option<String>,

    /// Directory containing ca.pem, cert.pem and key.pem
    #[clap(long, global = true)]
    docker_cert_path: Option<PathBuf>,

    /// Settings server id used for registry authentication
    #[clap(long, global = true)]
    server_id: Option<String>,

    /// Registry address sent along with the credentials
    #[clap(long, global = true)]
    registry_url: Option<String>,

    /// Do nothing
    #[clap(long, global = true)]
    skip_docker: bool,

    #[clap(long, global = true)]
    retry_push_count: Option<u32>,

    /// Delay between push attempts, in milliseconds
    #[clap(long, global = true)]
    retry_push_timeout: Option<u64>,

    #[clap(subcommand)]
    goal: Goal,
}

#[derive(Subcommand, Debug)]
enum Goal {
    /// Check the Docker daemon is reachable
    Ping,
    /// Tag an image under a new name
    Tag {
        image: String,
        new_name: String,
        /// Push the new name once tagged
        #[clap(long)]
        push: bool,
    },
    /// Push an image to its registry
    Push { image: String },
    /// Remove an image, or the given tags of it
    RemoveImage {
        image: String,
        #[clap(long = "tag")]
        tags: Vec<String>,
    },
}

impl Opts {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            docker_host: self.docker_host.clone(),
            docker_cert_path: self.docker_cert_path.clone(),
            server_id: self.server_id.clone(),
            registry_url: self.registry_url.clone(),
            skip_docker: self.skip_docker,
            settings_path: self.settings.clone(),
            retry_push_count: self.retry_push_count,
            retry_push_timeout_ms: self.retry_push_timeout,
        }
    }
}

fn goal_for(goal: Goal, config: &StepConfig) -> Box<dyn GoalPort> {
    match goal {
        Goal::Ping => Box::new(PingGoal),
        Goal::Tag { image, new_name, push } => {
            let tag = TagGoal::new(&image, &new_name);
            if push {
                Box::new(tag.with_push(config.retry_policy()))
            } else {
                Box::new(tag)
            }
        }
        Goal::Push { image } => Box::new(PushGoal::new(&image, config.retry_policy())),
        Goal::RemoveImage { image, tags } => Box::new(RemoveImageGoal::new(&image, tags)),
    }
}

async fn run(opts: Opts) -> Result<()> {
    let config = StepConfig::load(opts.config.as_deref())?.merge(opts.overrides());
    config.validate()?;

    let settings_path = match &config.settings_path {
        Some(path) => path.clone(),
        None => SettingsStore::default_path()?,
    };
    let settings = Arc::new(SettingsStore::load_from_path(&settings_path)?);

    let goal = goal_for(opts.goal, &config);
    let mut step = DockerStep::new(config.step_options(), settings, Box::new(BollardClientBuilder::from_env()));
    step.execute(goal.as_ref()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = Opts::parse();

    match run(opts).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
