//! `hltconf`: print the tables extracted from an HLT parameter tree
//!
//! ```text
//! hltconf [--config-env ENV] <TREE_FILE> [TARGET ...]
//! ```
//!
//! Targets default to `dump.targets` from the settings; the tree file
//! defaults to `input.tree_path`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use hlt_config_config::{constants, load_settings, ParamTree, Settings};
use hlt_config_provider::{DumpTarget, HltConfigData};

#[derive(Parser, Debug)]
#[command(name = "hltconf", version, about = "Inspect HLT trigger configuration trees")]
struct Args {
    /// Settings environment, read from config/{ENV}
    #[arg(long = "config-env", value_name = "ENV")]
    config_env: Option<String>,

    /// Parameter tree file (.json, .yaml, .yml or .toml)
    #[arg(value_name = "TREE_FILE")]
    tree: Option<PathBuf>,

    /// Tables to print, e.g. Triggers, Streams, PrescaleTable
    #[arg(value_name = "TARGET")]
    targets: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let environment = args
        .config_env
        .clone()
        .or_else(|| std::env::var(constants::env::ENVIRONMENT).ok());
    let settings = load_settings(environment.as_deref()).context("Failed to load settings")?;

    init_tracing(&settings);

    let targets = resolve_targets(&args.targets, &settings)?;
    let path = args
        .tree
        .or_else(|| settings.input.tree_path.as_ref().map(PathBuf::from))
        .context("No parameter tree given and input.tree_path is not set")?;

    let output = render_tree(&path, &targets)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Logs go to stderr so dumps on stdout stay clean
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("hlt_config={},hltconf={}", level, level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    subscriber.with(fmt_layer).init();
}

/// Requested targets, or the configured defaults when none are given
fn resolve_targets(requested: &[String], settings: &Settings) -> Result<Vec<DumpTarget>> {
    let names = if requested.is_empty() {
        settings.dump.targets.as_slice()
    } else {
        requested
    };

    names
        .iter()
        .map(|name| {
            name.parse::<DumpTarget>().with_context(|| {
                let known: Vec<&str> = DumpTarget::ALL.iter().map(DumpTarget::as_str).collect();
                format!("Expected one of: {}", known.join(", "))
            })
        })
        .collect()
}

fn render_tree(path: &Path, targets: &[DumpTarget]) -> Result<String> {
    let tree = ParamTree::from_file(path)
        .with_context(|| format!("Failed to load parameter tree from {}", path.display()))?;
    let hlt = HltConfigData::new(&tree).context("Failed to extract HLT configuration")?;

    tracing::debug!(
        path = %path.display(),
        triggers = hlt.size(),
        targets = targets.len(),
        "Rendering configuration"
    );

    Ok(targets.iter().map(|target| hlt.render(*target)).collect())
}
