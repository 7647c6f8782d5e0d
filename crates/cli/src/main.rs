use clap::{Args, Parser, Subcommand};
use cube_cache_domain::CliOverrides;
use std::path::PathBuf;
use tracing::info;

mod bootstrap;
mod probe;

#[derive(Parser)]
#[command(name = "cube-cache-stats")]
#[command(version)]
#[command(about = "Cube cache hit-rate monitor for dataset file access")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open dataset files through the cache interceptor and report hit rates
    Probe(ProbeArgs),

    /// Write the effective configuration to a TOML file
    InitConfig {
        /// Destination path
        path: String,
    },
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Dataset root whose files are redirected to the cache directory
    #[arg(long)]
    root_dir: Option<String>,

    /// Local cache directory
    #[arg(long)]
    cache_dir: Option<String>,

    /// Label printed as cube_cache_dir in each report
    #[arg(long)]
    label: Option<String>,

    /// Seconds between periodic reports
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Also report every N opened files
    #[arg(long)]
    every_batches: Option<u64>,

    /// File with one dataset path per line
    #[arg(short = 'm', long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Number of passes over the file list
    #[arg(long, default_value_t = 1)]
    pub passes: u32,

    /// Dataset paths to open
    pub paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        ..Default::default()
    };
    if let Command::Probe(args) = &cli.command {
        cli_overrides.cache_label = args.label.clone();
        cli_overrides.report_interval_secs = args.interval_secs;
        cli_overrides.report_every_batches = args.every_batches;
        cli_overrides.root_dir = args.root_dir.clone();
        cli_overrides.cache_dir = args.cache_dir.clone();
    }

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting cube-cache-stats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Probe(args) => probe::run(&config, args).await?,
        Command::InitConfig { path } => {
            config.save(&path)?;
            info!(path = %path, "Configuration written");
        }
    }

    Ok(())
}
