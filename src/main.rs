#![forbid(unsafe_code)]
//! Daily Briefing Command Line Interface

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use briefing::commands::{
    execute_generate, execute_init, execute_sections, GenerateOptions, InitOptions,
};
use briefing::config::DEFAULT_CONFIG_FILE;
use briefing::Config;

#[derive(Parser)]
#[command(name = "briefing")]
#[command(about = "Compose a daily news briefing note from search-engine queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all queries and write today's briefing (default)
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Archive directory to write the note into
        #[arg(long)]
        archive_dir: Option<PathBuf>,

        /// Per-query timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// List the sections and queries without running them
    Sections {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Queries file (default: <prompts_dir>/<weekday>-queries.md)
    #[arg(short, long)]
    queries: Option<PathBuf>,

    /// Briefing date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let command = cli.command.unwrap_or(Commands::Generate {
        run: RunArgs { queries: None, date: None },
        archive_dir: None,
        timeout: None,
    });

    match command {
        Commands::Init { force } => {
            execute_init(InitOptions { config_path: cli.config, force })?;
        }

        Commands::Generate { run, archive_dir, timeout } => {
            let config = Config::load_or_default(&cli.config)?;
            let options = GenerateOptions {
                queries: run.queries,
                archive_dir,
                timeout,
                date: run.date,
            };
            if let Err(e) = execute_generate(options, config).await {
                eprintln!("{} {}", style("✗").red(), e);
                std::process::exit(1);
            }
        }

        Commands::Sections { run } => {
            let config = Config::load_or_default(&cli.config)?;
            let options = GenerateOptions {
                queries: run.queries,
                date: run.date,
                ..Default::default()
            };
            execute_sections(options, config)?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,briefing=info".to_string(),
            2 => "info,briefing=debug".to_string(),
            _ => "debug,briefing=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}
