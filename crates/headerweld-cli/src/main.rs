//! headerweld CLI
//!
//! Command-line interface for producing the single-file header.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use headerweld_core::Config;
use headerweld_merge::{Amalgamation, Amalgamator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "headerweld.yaml";

#[derive(Parser)]
#[command(name = "headerweld")]
#[command(author, version, about = "Merge library headers into one drop-in header", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the merged header
    Generate {
        /// Merge configuration (default: ./headerweld.yaml, then built-in list)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify an existing merged header is up to date
    Check {
        /// Merge configuration (default: ./headerweld.yaml, then built-in list)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Previously generated header
        #[arg(value_name = "EXISTING")]
        existing: PathBuf,
    },

    /// Show how each line of a header is classified
    Classify {
        /// Header to classify
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Merge configuration (default: ./headerweld.yaml, then built-in list)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean header
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, output } => {
            cmd_generate(config.as_deref(), output.as_deref())?;
        }
        Commands::Check { config, existing } => {
            cmd_check(config.as_deref(), &existing)?;
        }
        Commands::Classify {
            file,
            config,
            format,
        } => {
            cmd_classify(&file, config.as_deref(), format)?;
        }
    }

    Ok(())
}

/// Resolve the merge configuration.
///
/// An explicit file wins; otherwise `headerweld.yaml` in `cwd`; otherwise the
/// built-in header list. Relative roots are taken from the config's directory.
fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(cwd.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
    };

    match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            let config = Config::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            let base = path.parent().unwrap_or(cwd);
            Ok(config.rebased(base))
        }
        None => {
            debug!("No config file, using built-in header list");
            Ok(Config::default().rebased(cwd))
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to read working directory")
}

fn merge(config: Option<&Path>, cwd: &Path) -> Result<Amalgamation> {
    let config = load_config(config, cwd)?;
    let merger = Amalgamator::new(config).context("Invalid merge configuration")?;
    let out = merger.run().context("Merge aborted")?;

    if !out.stats.unbalanced_files.is_empty() {
        info!(
            "{} header(s) ended inside a conditional region",
            out.stats.unbalanced_files.len()
        );
    }
    Ok(out)
}

fn cmd_generate(config: Option<&Path>, output: Option<&Path>) -> Result<()> {
    generate(config, output, &current_dir()?)
}

fn generate(config: Option<&Path>, output: Option<&Path>, cwd: &Path) -> Result<()> {
    // Fully rendered before anything is written, so a failed merge leaves no partial file
    let out = merge(config, cwd)?;
    let rendered = out.render();

    if let Some(out_path) = output {
        std::fs::write(out_path, &rendered)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        println!("📄 Output written to: {}", out_path.display());
        println!(
            "   {} headers, {} includes, {} body lines",
            out.stats.files,
            out.includes.len(),
            out.body.len()
        );
    } else {
        out.write_to(std::io::stdout().lock())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn cmd_check(config: Option<&Path>, existing: &Path) -> Result<()> {
    let out = merge(config, &current_dir()?)?;
    let current = std::fs::read_to_string(existing)
        .with_context(|| format!("Failed to read {}", existing.display()))?;

    if let Some(mismatch) = out.first_mismatch(&current) {
        bail!("{} is out of date: {}", existing.display(), mismatch);
    }

    println!("✅ {} is up to date", existing.display());
    Ok(())
}

fn cmd_classify(file: &Path, config: Option<&Path>, format: Format) -> Result<()> {
    let config = load_config(config, &current_dir()?)?;
    let merger = Amalgamator::new(config).context("Invalid merge configuration")?;

    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let lines = merger.classifier().classify_source(&source);

    match format {
        Format::Json => {
            let result = serde_json::json!({
                "file": file.to_string_lossy(),
                "lines": lines,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Text => {
            println!("📂 {}", file.display());
            for line in &lines {
                println!("{:>5}  {:<26} {}", line.line, line.kind.as_str(), line.text);
            }
        }
    }

    Ok(())
}
