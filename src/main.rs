use anyhow::Result;
use clap::Parser;
use k8s_deprecations::{Cli, Commands, config};
use tracing_subscriber::filter::LevelFilter;

fn init_tracing(level: LevelFilter) -> Result<()> {
  // Handlebars reports through `log`
  tracing_log::LogTracer::init()?;

  let subscriber = tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose.tracing_level_filter())?;

  let config = config::load(cli.config.as_deref())?;

  match &cli.commands {
    Commands::Render(args) => k8s_deprecations::render(args, &config)?,
    Commands::List(args) => k8s_deprecations::list(args, &config)?,
  }

  Ok(())
}
