//! Layered application configuration.
//!
//! A TOML file (optional) under `COURSEMARK_`-prefixed environment variables.
//! Nested keys use a double underscore, e.g.
//! `COURSEMARK_ISSUER__ORGANIZATION`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use coursemark_certificate::{Issuer, LayoutConfig};
use serde::Deserialize;
use uuid::Uuid;

pub const ENV_PREFIX: &str = "COURSEMARK";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// SQLite file holding learner progress.
  pub store_path:   PathBuf,
  /// Directory of `<course_id>.json` course files.
  pub catalog_dir:  PathBuf,
  /// Where certificates are written.
  pub output_dir:   PathBuf,
  pub learner_id:   Option<Uuid>,
  pub learner_name: String,
  pub issuer:       Issuer,
  pub date_format:  String,
}

impl Default for AppConfig {
  fn default() -> Self {
    let layout = LayoutConfig::default();
    Self {
      store_path:   PathBuf::from("~/.local/share/coursemark/progress.db"),
      catalog_dir:  PathBuf::from("courses"),
      output_dir:   PathBuf::from("."),
      learner_id:   None,
      learner_name: String::new(),
      issuer:       layout.issuer,
      date_format:  layout.date_format,
    }
  }
}

impl AppConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  /// Layout settings with this config's issuer and date format.
  pub fn layout(&self) -> LayoutConfig {
    LayoutConfig {
      issuer: self.issuer.clone(),
      date_format: self.date_format.clone(),
      ..LayoutConfig::default()
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
