//! Main entry point for the wichteln command line tool
//!
//! Loads configuration, reads a group definition, runs the matching engine
//! and prints the resulting assignment or a single participant's recipient.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use wichteln::config::AppConfig;
use wichteln::exchange::{Exchange, ExchangeService, ExchangeSummary, GroupRequest};
use wichteln::identifier::generate_identifier;
use wichteln::metrics::MetricsCollector;
use wichteln::types::Pair;

/// Wichteln - Secret Santa gift assignment
#[derive(Parser)]
#[command(
    name = "wichteln",
    version,
    about = "Assign Secret Santa gift givers while honouring forbidden pairs",
    long_about = "Wichteln assigns every participant of a gift exchange exactly one other \
                 participant to gift. Forbidden giver/receiver pairs are respected whenever a \
                 random search finds a valid assignment; otherwise a rotation fallback is used \
                 and reported as degraded."
)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Seed override
    #[arg(long, global = true, value_name = "SEED", help = "Seed for reproducible assignments")]
    seed: Option<u64>,

    /// Attempt budget override
    #[arg(
        long,
        global = true,
        value_name = "N",
        help = "Random permutations tried before the rotation fallback"
    )]
    max_attempts: Option<u32>,

    /// Refuse degraded assignments
    #[arg(long, global = true, help = "Fail instead of accepting a degraded assignment")]
    reject_degraded: bool,

    /// Check feasibility first
    #[arg(
        long,
        global = true,
        help = "Refuse constraint sets that admit no valid assignment before searching"
    )]
    check_feasibility: bool,

    /// Print metrics when done
    #[arg(long, global = true, help = "Print Prometheus metrics after the command")]
    metrics: bool,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate inputs and exit)
    #[arg(
        long,
        global = true,
        help = "Validate configuration and input without assigning"
    )]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign gift recipients for a group
    Assign {
        /// Group definition (TOML, or JSON with a .json extension)
        #[arg(short, long, value_name = "FILE")]
        group: PathBuf,
        /// Only print the recipient of this participant
        #[arg(short, long, value_name = "NAME")]
        reveal: Option<String>,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate exchange identifiers
    Identifier {
        /// Number of identifiers to generate
        #[arg(short, long, default_value = "1")]
        count: usize,
    },
}

/// Full assignment output for the organiser
#[derive(Serialize)]
struct AssignmentReport<'a> {
    summary: ExchangeSummary,
    assignment: &'a [Pair],
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(seed) = args.seed {
        config.matching.seed = Some(seed);
    }

    if let Some(max_attempts) = args.max_attempts {
        config.matching.max_attempts = max_attempts;
    }

    if args.reject_degraded {
        config.matching.reject_degraded = true;
    }

    if args.check_feasibility {
        config.matching.check_feasibility = true;
    }

    wichteln::config::validate_config(&config)?;
    Ok(config)
}

/// Read a group request from TOML, or JSON when the extension says so
fn load_group(path: &Path) -> Result<GroupRequest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read group file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&contents).map_err(|e| anyhow!("Invalid group file: {}", e))
    } else {
        toml::from_str(&contents).map_err(|e| anyhow!("Invalid group file: {}", e))
    }
}

fn create_rng(config: &AppConfig) -> StdRng {
    match config.matching.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_exchange(exchange: &Exchange, reveal: Option<&str>, json: bool) -> Result<()> {
    if let Some(name) = reveal {
        let reveal = exchange.reveal(name)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&reveal)?);
        } else {
            println!("{} gifts {}", reveal.participant_name, reveal.recipient_name);
        }
        return Ok(());
    }

    if json {
        let report = AssignmentReport {
            summary: exchange.summary(),
            assignment: exchange.assignment.pairs(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Exchange: {}", exchange.identifier);
    if let Some(description) = &exchange.description {
        println!("  {}", description);
    }
    for participant in &exchange.participants {
        let recipient = exchange
            .assignment
            .receiver_of(&participant.name)
            .unwrap_or("?");
        println!(
            "  [{}] {} → {}",
            participant.code, participant.name, recipient
        );
    }
    if exchange.degraded {
        eprintln!("Warning: assignment is degraded and may contain forbidden pairs");
    }

    Ok(())
}

fn run(args: &Args, config: AppConfig) -> Result<()> {
    let metrics = Arc::new(MetricsCollector::new()?);
    let mut rng = create_rng(&config);

    match &args.command {
        Commands::Assign {
            group,
            reveal,
            json,
        } => {
            let request = load_group(group)?;

            if args.dry_run {
                request.validate(&config.exchange)?;
                info!("Group definition is valid - exiting without assigning");
                return Ok(());
            }

            let service = ExchangeService::from_config(config)?.with_metrics(metrics.clone());
            let exchange = service.create_exchange(&request, &mut rng)?;
            print_exchange(&exchange, reveal.as_deref(), *json)?;
        }
        Commands::Identifier { count } => {
            if args.dry_run {
                info!("Configuration validation successful");
                return Ok(());
            }
            for _ in 0..*count {
                println!("{}", generate_identifier(&mut rng));
            }
        }
    }

    if args.metrics {
        print!("{}", metrics.gather()?);
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        service = %config.service.name,
        max_attempts = config.matching.max_attempts,
        seeded = config.matching.seed.is_some(),
        "Starting"
    );

    if let Err(e) = run(&args, config) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
