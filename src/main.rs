//! CLI entry point for `sharebridge`.
//!
//! Developer tooling around the bridge: validate and inspect batch JSON
//! captures, compute distances, generate completions and a man page.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use sharebridge::config;
use sharebridge::marshal;
use sharebridge::model::batch::AttachmentBatch;
use sharebridge::model::geo::Coordinate;

#[derive(Parser)]
#[command(name = "sharebridge", version)]
#[command(about = "Inspect and validate attachment batches for the share bridge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a batch JSON file against the configured limits
    Validate {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show statistics for a batch JSON file
    Stats {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Compute the great-circle distance between two coordinates
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let cfg = config::load_config();

    let log_level = match cli.verbose {
        0 => cfg.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level);

    match cli.command {
        Commands::Validate { file, json } => cmd_validate(&file, json, &cfg),
        Commands::Stats { file, json } => cmd_stats(&file, json),
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => cmd_distance(lat1, lon1, lat2, lon2),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing on stderr only; file logging belongs to the library init.
fn setup_logging(level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "sharebridge", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Load a batch from a JSON capture file.
fn load_batch(path: &Path) -> anyhow::Result<AttachmentBatch> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let contents = std::fs::read_to_string(path)?;
    let batch = serde_json::from_str(&contents)?;
    Ok(batch)
}

/// Validate a batch file and report the verdict.
fn cmd_validate(path: &Path, json: bool, cfg: &config::Config) -> anyhow::Result<()> {
    let batch = load_batch(path)?;
    let verdict = marshal::validate_batch(&batch, &cfg.validation);

    if json {
        let output = match &verdict {
            Ok(()) => serde_json::json!({ "valid": true }),
            Err(e) => serde_json::json!({
                "valid": false,
                "status": e.status_code(),
                "reason": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &verdict {
            Ok(()) => println!("  OK: {} record(s), {} group(s)", batch.len(), batch.batch_ids().len()),
            Err(e) => println!("  INVALID: {e}"),
        }
    }

    if verdict.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

/// Show statistics for a batch file.
fn cmd_stats(path: &Path, json: bool) -> anyhow::Result<()> {
    let batch = load_batch(path)?;

    if json {
        print_stats_json(path, &batch)?;
    } else {
        print_stats_table(path, &batch);
    }
    Ok(())
}

/// Compute and print a distance.
fn cmd_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> anyhow::Result<()> {
    let from = Coordinate::new(lat1, lon1);
    let to = Coordinate::new(lat2, lon2);
    let meters = from.distance_m(&to);
    println!("{:.1} m ({:.2} km)", meters, meters / 1000.0);
    Ok(())
}

/// Total bytes of inline text payload in a batch.
fn text_payload_bytes(batch: &AttachmentBatch) -> u64 {
    batch.texts().iter().map(|t| t.text_body.len() as u64).sum()
}

/// Print statistics in a human-readable table.
fn print_stats_table(path: &Path, batch: &AttachmentBatch) {
    use humansize::{format_size, BINARY};

    println!();
    println!("  {:<20} {}", "File", path.display());
    println!("  {:<20} {}", "Records", batch.len());
    println!("  {:<20} {}", "File attachments", batch.file_count());
    println!("  {:<20} {}", "Text attachments", batch.text_count());
    println!("  {:<20} {}", "Wi-Fi credentials", batch.wifi_count());
    println!(
        "  {:<20} {}",
        "Text payload",
        format_size(text_payload_bytes(batch), BINARY)
    );

    let ids = batch.batch_ids();
    println!("  {:<20} {}", "Submission groups", ids.len());
    for id in &ids {
        let members = batch.with_batch_id(*id);
        let kinds: Vec<&str> = members.iter().map(|m| m.kind()).collect();
        println!("    {:>6}  {} record(s): {}", id, members.len(), kinds.join(", "));
    }
    println!();
}

/// Print statistics as JSON.
fn print_stats_json(path: &Path, batch: &AttachmentBatch) -> anyhow::Result<()> {
    let ids = batch.batch_ids();
    let groups: Vec<serde_json::Value> = ids
        .iter()
        .map(|&id| {
            serde_json::json!({
                "batch_id": id,
                "records": batch.with_batch_id(id).len(),
            })
        })
        .collect();

    let stats = serde_json::json!({
        "file": path.to_string_lossy(),
        "records": batch.len(),
        "files": batch.file_count(),
        "texts": batch.text_count(),
        "wifi_credentials": batch.wifi_count(),
        "text_payload_bytes": text_payload_bytes(batch),
        "groups": groups,
    });

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
