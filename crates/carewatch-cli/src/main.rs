//! `carewatch`: ingest licensing batches, inspect results, serve the API.
//!
//! # Usage
//!
//! ```text
//! carewatch ingest --source mn-geopackage batches/mn-2024-11-21.json
//! carewatch summary --state MN --refresh
//! carewatch export --state MN --out data/mn
//! carewatch unresolved --state MN --limit 20
//! carewatch serve
//! ```
//!
//! Settings come from `carewatch.toml` (or `--config`), overridden by
//! `CAREWATCH_*` environment variables.

mod settings;

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::{Context as _, bail};
use carewatch_core::{
  facility::{County, Facility},
  memory::MemoryStore,
  pipeline::{Pipeline, RunReport, refresh_state_summary},
  profile::SourceProfile,
  raw::RawBatch,
  store::FacilityStore,
};
use carewatch_store_sqlite::SqliteStore;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::AppConfig;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "carewatch", version, about = "Childcare licensing dataset builder")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "carewatch.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Normalize, deduplicate and store one adapter batch.
  Ingest {
    /// JSON batch: an array of rows or `{source, extracted_at, rows}`.
    batch: PathBuf,

    /// Built-in source profile; defaults to the batch's own `source`.
    #[arg(long)]
    source: Option<String>,

    /// JSON source profile file, instead of a built-in one.
    #[arg(long, conflicts_with = "source")]
    profile: Option<PathBuf>,

    /// Extraction time to stamp on records (RFC 3339). Defaults to the
    /// batch's `extracted_at`, then to now.
    #[arg(long)]
    scraped_at: Option<DateTime<Utc>>,

    /// Run against an in-memory store and print the report only.
    #[arg(long)]
    dry_run: bool,
  },

  /// Print the statewide summary.
  Summary {
    #[arg(long)]
    state: String,

    /// Recompute from the stored collections before printing.
    #[arg(long)]
    refresh: bool,
  },

  /// Write facility collections and the summary as JSON.
  Export {
    #[arg(long)]
    state: String,

    /// Only this jurisdiction.
    #[arg(long)]
    county: Option<String>,

    /// Output directory; prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// List localities the county resolver could not place.
  Unresolved {
    #[arg(long)]
    state: String,

    #[arg(long)]
    limit: Option<usize>,
  },

  /// Serve the read-only JSON API.
  Serve,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  match cli.command {
    Command::Ingest { batch, source, profile, scraped_at, dry_run } => {
      ingest(&cfg, &batch, source, profile, scraped_at, dry_run).await
    }
    Command::Summary { state, refresh } => summary(&cfg, &state, refresh).await,
    Command::Export { state, county, out } => {
      export(&cfg, &state, county.as_deref(), out.as_deref()).await
    }
    Command::Unresolved { state, limit } => unresolved(&cfg, &state, limit).await,
    Command::Serve => serve(&cfg).await,
  }
}

async fn open_store(cfg: &AppConfig) -> anyhow::Result<SqliteStore> {
  SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

// ─── Commands ────────────────────────────────────────────────────────────────

async fn ingest(
  cfg: &AppConfig,
  batch_path: &Path,
  source: Option<String>,
  profile_path: Option<PathBuf>,
  scraped_at: Option<DateTime<Utc>>,
  dry_run: bool,
) -> anyhow::Result<()> {
  let json = std::fs::read_to_string(batch_path)
    .with_context(|| format!("reading batch {}", batch_path.display()))?;
  let batch = RawBatch::from_json(&json)
    .with_context(|| format!("parsing batch {}", batch_path.display()))?;

  let profile = match (profile_path, source.or_else(|| batch.source.clone())) {
    (Some(path), _) => {
      let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading profile {}", path.display()))?;
      serde_json::from_str::<SourceProfile>(&raw)
        .with_context(|| format!("parsing profile {}", path.display()))?
    }
    (None, Some(name)) => SourceProfile::builtin(&name)?,
    (None, None) => bail!(
      "batch names no source; pass --source (one of {})",
      SourceProfile::builtin_names().join(", ")
    ),
  };

  let tables = cfg.tables(&profile.state)?;
  let pipeline =
    Pipeline::new(tables, profile)?.with_max_parallel(cfg.max_parallel_jurisdictions);
  let scraped_at = scraped_at.or(batch.extracted_at).unwrap_or_else(Utc::now);

  let report = if dry_run {
    pipeline.run(Arc::new(MemoryStore::new()), &batch.rows, scraped_at).await
  } else {
    pipeline.run(Arc::new(open_store(cfg).await?), &batch.rows, scraped_at).await
  };

  print_json(&report)?;
  check_report(&report)
}

fn check_report(report: &RunReport) -> anyhow::Result<()> {
  if report.is_success() {
    return Ok(());
  }
  let failed: Vec<_> = report.failed.iter().map(|f| f.county.as_str()).collect();
  bail!(
    "ingest incomplete: {} jurisdiction(s) failed [{}]{}{}{}",
    failed.len(),
    failed.join(", "),
    report
      .relocation_error
      .as_deref()
      .map(|e| format!("; stored index: {e}"))
      .unwrap_or_default(),
    report
      .unresolved_error
      .as_deref()
      .map(|e| format!("; unresolved table: {e}"))
      .unwrap_or_default(),
    report
      .state_summary_error
      .as_deref()
      .map(|e| format!("; state summary: {e}"))
      .unwrap_or_default(),
  )
}

async fn summary(cfg: &AppConfig, state: &str, refresh: bool) -> anyhow::Result<()> {
  let store = open_store(cfg).await?;
  let summary = if refresh {
    refresh_state_summary(&store, state).await?
  } else {
    match store.load_state_summary(state).await? {
      Some(summary) => summary,
      None => bail!("no summary stored for {state}; run an ingest or pass --refresh"),
    }
  };
  print_json(&summary)
}

async fn export(
  cfg: &AppConfig,
  state: &str,
  county: Option<&str>,
  out: Option<&Path>,
) -> anyhow::Result<()> {
  let store = open_store(cfg).await?;
  let counties: Vec<County> = store
    .list_jurisdictions(state)
    .await?
    .into_iter()
    .filter(|c| county.is_none_or(|want| c.as_str().eq_ignore_ascii_case(want)))
    .collect();
  if let Some(want) = county
    && counties.is_empty()
  {
    bail!("no jurisdiction {want:?} stored for {state}");
  }

  let mut collections: BTreeMap<County, Vec<Facility>> = BTreeMap::new();
  for county in counties {
    let facilities = store.load_facilities(state, &county).await?;
    collections.insert(county, facilities);
  }
  let summary = store.load_state_summary(state).await?;

  let Some(dir) = out else {
    return print_json(&collections);
  };

  std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
  for (county, facilities) in &collections {
    let path = dir.join(format!("{}.json", file_stem(county)));
    std::fs::write(&path, serde_json::to_string_pretty(facilities)?)
      .with_context(|| format!("writing {}", path.display()))?;
  }
  if let Some(summary) = summary {
    let path = dir.join("summary.json");
    std::fs::write(&path, serde_json::to_string_pretty(&summary)?)
      .with_context(|| format!("writing {}", path.display()))?;
  }
  tracing::info!(state, files = collections.len(), dir = %dir.display(), "exported");
  Ok(())
}

/// `"St. Louis"` → `"st_louis"`, `"Prince George's"` → `"prince_georges"`.
fn file_stem(county: &County) -> String {
  let mut stem = String::new();
  for word in county.as_str().split_whitespace() {
    if !stem.is_empty() {
      stem.push('_');
    }
    stem.extend(
      word
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase()),
    );
  }
  stem
}

async fn unresolved(cfg: &AppConfig, state: &str, limit: Option<usize>) -> anyhow::Result<()> {
  let store = open_store(cfg).await?;
  let table = store.load_unresolved(state).await?;
  if table.is_empty() {
    eprintln!("no unresolved localities for {state}");
    return Ok(());
  }
  for (locality, n) in table.most_frequent().into_iter().take(limit.unwrap_or(usize::MAX)) {
    println!("{n:>6}  {locality}");
  }
  Ok(())
}

async fn serve(cfg: &AppConfig) -> anyhow::Result<()> {
  let store = Arc::new(open_store(cfg).await?);
  let app = axum::Router::new()
    .nest("/api", carewatch_api::api_router(store))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
