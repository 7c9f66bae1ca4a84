use anyhow::Result;
use clap::Parser;
use linkedin_evolved::cli::{handle_command, Cli};
use linkedin_evolved::{ClientConfig, LinkedInEvolved, Session, VoyagerClient};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    let session = Session::load()?;
    info!("Loaded session with {} cookies", session.cookies().len());

    let api = LinkedInEvolved::new(VoyagerClient::new(config, session)?);
    handle_command(cli, &api).await
}
