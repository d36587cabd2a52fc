use clap::Parser;
use mediagallery_lib::bootstrap::{load_config, tracing::init_tracing_subscriber};
use mediagallery_lib::cli::Cli;
use mediagallery_lib::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing_subscriber()?;
    let config = load_config(cli.config.as_deref())?;

    commands::run(cli.command, &config).await
}
