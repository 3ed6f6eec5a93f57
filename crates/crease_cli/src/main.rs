//! crease CLI
//!
//! Recalculate an innings from a ball log file, verify a written snapshot, or
//! convert between legal-ball counts and overs notation.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing::{debug, info};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "crease")]
#[command(about = "Recalculate cricket innings from ball-by-ball logs", long_about = None)]
struct Cli {
    /// Debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Recalculate an innings snapshot from a ball log
    Recalc {
        /// Ball log JSON (array, or object with a "balls" array)
        #[arg(long)]
        balls: PathBuf,

        /// Match config JSON (falls back to $CREASE_MATCH_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output snapshot file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output metadata JSON file (requires --out)
        #[arg(long, requires = "out")]
        metadata: Option<PathBuf>,

        /// Pretty-print the snapshot
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Verify a snapshot file against its checksum
    Verify {
        #[arg(long)]
        snapshot: PathBuf,

        /// Expected SHA-256 (hex)
        #[arg(long)]
        checksum: String,
    },

    /// Convert legal balls to overs, or parse an overs string
    Overs {
        /// Legal ball count, e.g. 13 -> 2.1
        #[arg(long, conflicts_with = "parse", required_unless_present = "parse")]
        balls: Option<u32>,

        /// Overs string, e.g. 2.1 -> 13
        #[arg(long)]
        parse: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // try_init also bridges the `log` records emitted by crease_core
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Recalc { balls, config, out, metadata, pretty } => {
            let log = crease_cli::load_ball_log(&balls)?;
            let config = match crease_cli::resolve_config_path(config) {
                Some(path) => {
                    debug!("Using match config {}", path.display());
                    crease_cli::load_match_config(&path)?
                }
                None => crease_core::MatchConfig::default(),
            };
            info!("Loaded {} deliveries from {}", log.len(), balls.display());

            let snapshot = crease_core::recalculate_innings(&log, &config);

            match out {
                Some(out) => {
                    let meta = crease_cli::write_snapshot(&snapshot, log.len(), &out, pretty)?;
                    print_summary(&snapshot);
                    println!("   Snapshot: {}", out.display());
                    println!("   Checksum: {}", meta.checksum);

                    if let Some(metadata_path) = metadata {
                        crease_cli::save_metadata(&metadata_path, &meta)?;
                        println!("   Metadata: {}", metadata_path.display());
                    }
                }
                None => println!("{}", crease_cli::snapshot_json(&snapshot, pretty)?),
            }
        }

        Commands::Verify { snapshot, checksum } => {
            if crease_cli::verify_snapshot(&snapshot, &checksum)? {
                println!("Snapshot verification passed");
            } else {
                anyhow::bail!("Snapshot verification failed - checksum mismatch");
            }
        }

        Commands::Overs { balls, parse } => match (balls, parse) {
            (Some(balls), _) => println!("{}", crease_core::rules::format_overs(balls)),
            (None, Some(text)) => match crease_core::rules::parse_overs(&text) {
                Some(balls) => println!("{balls}"),
                None => anyhow::bail!("Not an overs value: {text:?}"),
            },
            (None, None) => anyhow::bail!("Pass --balls or --parse"),
        },
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(snapshot: &crease_core::InningsSnapshot) {
    use crease_core::rules::{format_extras, format_fall_of_wicket, format_rate, format_score};

    println!(
        "{} ({} ov)",
        format_score(snapshot.total_runs, snapshot.total_wickets),
        snapshot.overs
    );
    println!("   Run rate: {}", format_rate(Some(snapshot.current_run_rate)));
    if snapshot.target.is_some() {
        println!("   Required: {}", format_rate(snapshot.required_run_rate));
    }
    println!("   Extras:   {}", format_extras(&snapshot.extras));
    if !snapshot.fall_of_wickets.is_empty() {
        let fow: Vec<String> = snapshot.fall_of_wickets.iter().map(format_fall_of_wicket).collect();
        println!("   FoW:      {}", fow.join(", "));
    }
    println!("   Status:   {:?}", snapshot.status);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("crease CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
