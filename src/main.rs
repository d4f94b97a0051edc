//! doomdoc — build the documentation model from declaration snapshots.
//!
//! Reads one or more JSON snapshots (files, globs, or stdin), converts every
//! declaration, groups the result by package, builds the search index and
//! writes the serialized model.

use anyhow::{Context, Result};
use clap::Parser;
use doomdoc::render;
use doomdoc::source::Snapshot;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "doomdoc",
    about = "Build a searchable documentation model from declaration snapshots"
)]
struct Cli {
    /// Snapshot files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output file. Writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: compact (default), pretty, legacy
    #[arg(short = 'f', long, default_value = "compact")]
    format: String,

    /// Fail on declarations of unsupported kinds instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Log conversion details to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let renderer = render::create_renderer(&cli.format)?;
    let snapshot = read_snapshots(&cli.files)?;

    let tree = doomdoc::build_tree(&snapshot, cli.strict)?;
    tracing::info!(
        title = %tree.project_name(),
        packages = tree.package_count(),
        types = tree.type_count(),
        "model built"
    );

    let output = renderer.render(tree.model())?;
    match cli.output {
        Some(ref path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("failed to write stdout")?;
            stdout.write_all(b"\n").context("failed to write stdout")?;
        }
    }
    Ok(())
}

/// Logs go to stderr so stdout stays a clean payload.
fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "doomdoc=debug" } else { "doomdoc=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
    Ok(())
}

/// Read every input and concatenate them into one snapshot, in input order.
fn read_snapshots(patterns: &[String]) -> Result<Snapshot> {
    if patterns.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return serde_json::from_str(&input).context("failed to parse snapshot from stdin");
    }

    let mut merged = Snapshot::default();
    for path in expand_globs(patterns)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        merged.packages.extend(snapshot.packages);
        merged.declarations.extend(snapshot.declarations);
    }
    Ok(merged)
}

/// Expand glob patterns into a list of real file paths.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            anyhow::bail!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Same file named twice is read once; first occurrence keeps its place.
    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}
