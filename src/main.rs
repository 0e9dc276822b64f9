//! claimquery CLI entry point

use std::path::PathBuf;

use claimquery::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// claimquery: ask ranking and aggregation questions about claims
#[derive(Parser, Debug)]
#[command(name = "claimquery")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Claim records file (JSON array or JSON lines), overrides data.records_path
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a question from the claim records
    Ask {
        /// Natural language question
        question: String,
        /// Filter expression for aggregations (e.g. "patientState eq 'CA'")
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show the backend request a question maps to, without running it
    Plan {
        /// Natural language question
        question: String,
        /// Filter expression for aggregations
        #[arg(short, long)]
        filter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.map(PathBuf::from).or_else(Config::locate);
    let mut config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(data) = args.data {
        config.data.records_path = Some(data);
    }
    config.validate()?;

    init_tracing(&config);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }

    match args.command {
        Command::Ask { question, filter } => {
            cli::run_ask(config, question, filter, args.json).await
        }
        Command::Plan { question, filter } => cli::run_plan(question, filter, args.json),
    }
}

/// Log to stderr so answers on stdout stay machine readable.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
