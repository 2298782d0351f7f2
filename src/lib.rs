pub mod config;
pub mod deprecation;
pub mod error;
pub mod extract;
pub mod gvk;
pub mod output;
pub mod render;
pub mod schema;

use std::path::PathBuf;

use anstyle::{AnsiColor, Effects};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, builder::Styles};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use error::Error;
pub use extract::{ApiRecord, DeprecatedField, Registry, build_registry};

fn styles() -> Styles {
  Styles::styled()
    .header(AnsiColor::Green.on_default() | Effects::BOLD)
    .usage(AnsiColor::Green.on_default() | Effects::BOLD)
    .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
    .placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(author, about, version, styles = styles())]
#[command(propagate_version = true, disable_version_flag = true)]
pub struct Cli {
  #[command(subcommand)]
  pub commands: Commands,

  /// Print version
  #[arg(short = 'V', long = "tool-version", action = clap::ArgAction::Version, global = true)]
  pub tool_version: Option<bool>,

  /// Path to a configuration file (default `.k8s-deprecations.yaml` if present)
  #[arg(long, global = true)]
  pub config: Option<String>,

  #[clap(flatten)]
  pub verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  Render(Render),
  List(List),
}

/// Location of the Kubernetes API schema (swagger) file
#[derive(Args, Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchemaArgs {
  /// Path to the schema file, takes precedence over the version lookup
  #[arg(long)]
  pub schema: Option<PathBuf>,

  /// Kubernetes version to check for deprecations [default: master]
  #[arg(long = "version", alias = "k8s-version")]
  pub kubernetes_version: Option<String>,

  /// Directory holding `swagger-<version>.json` [default: same as the Kubernetes version]
  #[arg(long)]
  pub path: Option<PathBuf>,
}

impl SchemaArgs {
  /// Resolve the schema file from the flags, then the configuration, then the defaults
  pub fn resolve(&self, config: &config::SchemaConfig) -> Result<PathBuf, Error> {
    let version = self
      .kubernetes_version
      .clone()
      .or_else(|| config.version.clone())
      .unwrap_or_else(|| schema::DEFAULT_VERSION.to_string());

    let dir = self
      .path
      .clone()
      .or_else(|| config.path.as_ref().map(PathBuf::from))
      .unwrap_or_else(|| PathBuf::from(&version));

    schema::locate(self.schema.as_deref(), &version, &dir)
  }
}

/// Render the deprecated APIs through a handlebars template
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Render {
  #[command(flatten)]
  pub schema: SchemaArgs,

  /// Path to the template to render (default: built-in Markdown report)
  #[arg(short, long)]
  pub template: Option<String>,

  /// Write to file instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,
}

/// List the APIs found in the schema
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct List {
  #[command(flatten)]
  pub schema: SchemaArgs,

  #[arg(short, long, value_enum, default_value_t)]
  pub format: output::Format,

  /// Write to file instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,

  /// Include APIs without any deprecation
  #[arg(long)]
  pub all: bool,
}

/// Read the schema file and extract the registry of APIs
pub fn load_registry(args: &SchemaArgs, config: &config::Config) -> Result<Registry> {
  let path = args.resolve(&config.schema)?;
  info!("Reading Kubernetes API schema from {}", path.display());

  let document = schema::read(&path)?;
  let apis = build_registry(&document).context("error populating API map from schema file")?;
  info!(
    "Found {} APIs, {} with deprecations",
    apis.len(),
    apis.iter().filter(|(_, record)| record.has_deprecations()).count()
  );

  Ok(apis)
}

/// Render the registry through the configured template
pub fn render(args: &Render, config: &config::Config) -> Result<()> {
  let apis = load_registry(&args.schema, config)?;

  let renderer = match args.template.as_deref().or(config.template.as_deref()) {
    Some(template) => {
      render::Renderer::from_file(template).with_context(|| format!("error loading template {template}"))?
    }
    None => render::Renderer::embedded()?,
  };

  let rendered = renderer.render(&apis).context("error templating deprecations")?;
  output::write(&rendered, &args.output)?;

  Ok(())
}

/// Print the registry as a table, JSON or YAML
pub fn list(args: &List, config: &config::Config) -> Result<()> {
  let apis = load_registry(&args.schema, config)?;
  let apis = if args.all { apis } else { apis.deprecated() };

  let output = output::format(&apis, &args.format)?;
  output::write(&output, &args.output)?;

  Ok(())
}
