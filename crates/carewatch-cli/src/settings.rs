//! Runtime configuration and table loading.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use carewatch_core::tables::StateTables;
use serde::Deserialize;

/// Runtime configuration, deserialised from `carewatch.toml` layered with
/// `CAREWATCH_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub store_path:                 PathBuf,
  pub host:                       String,
  pub port:                       u16,
  pub max_parallel_jurisdictions: usize,
  /// Directory of `<STATE>.json` table files overriding the built-ins.
  pub tables_dir:                 Option<PathBuf>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path:                 PathBuf::from("carewatch.db"),
      host:                       "127.0.0.1".to_owned(),
      port:                       8080,
      max_parallel_jurisdictions: 4,
      tables_dir:                 None,
    }
  }
}

impl AppConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CAREWATCH"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.tables_dir = cfg.tables_dir.as_deref().map(expand_tilde);
    Ok(cfg)
  }

  /// Tables for `state`: `<tables_dir>/<STATE>.json` when present, the
  /// built-in tables otherwise.
  pub fn tables(&self, state: &str) -> anyhow::Result<StateTables> {
    let state = state.to_uppercase();
    if let Some(dir) = &self.tables_dir {
      let file = dir.join(format!("{state}.json"));
      if file.is_file() {
        let tables = StateTables::load(&file)
          .with_context(|| format!("failed to load tables from {}", file.display()))?;
        anyhow::ensure!(
          tables.state() == state,
          "{} holds tables for {}, expected {state}",
          file.display(),
          tables.state()
        );
        tracing::info!(state = %state, file = %file.display(), "using table file");
        return Ok(tables);
      }
    }
    StateTables::builtin(&state).with_context(|| format!("no tables for {state}"))
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
