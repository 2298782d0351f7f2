use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration loaded from `.k8s-deprecations.yaml` or an explicit path.
///
/// Values set here act as defaults; command line flags take precedence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub schema: SchemaConfig,

  /// Template rendered by `render` when `--template` is not given
  #[serde(default)]
  pub template: Option<String>,
}

/// Where to find the Kubernetes API schema
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
  /// Kubernetes version tag of the schema (default `master`)
  #[serde(default)]
  pub version: Option<String>,

  /// Directory holding `swagger-<version>.json` (default: the version tag)
  #[serde(default)]
  pub path: Option<String>,
}

const DEFAULT_CONFIG_FILE: &str = ".k8s-deprecations.yaml";

/// Load configuration from an explicit path, the default `.k8s-deprecations.yaml`
/// in the current working directory, or fall back to `Config::default()`.
pub fn load(path: Option<&str>) -> Result<Config> {
  load_from(path, std::env::current_dir().ok().as_deref())
}

fn load_from(path: Option<&str>, base_dir: Option<&Path>) -> Result<Config> {
  if let Some(p) = path {
    return read(Path::new(p));
  }

  if let Some(dir) = base_dir {
    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
      return read(&default_path);
    }
  }

  Ok(Config::default())
}

fn read(path: &Path) -> Result<Config> {
  let contents =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
  let config: Config =
    serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config file: {}", path.display()))?;
  tracing::debug!("Loaded configuration from {}", path.display());

  Ok(config)
}
