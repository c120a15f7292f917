use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codemap::config::{Config, LoggingConfig};

mod cli;

#[derive(Parser)]
#[command(name = "codemap")]
#[command(version)]
#[command(about = "Structural catalog of source code for AI agents and CLIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory to scan (shorthand for 'codemap scan <DIR>')
    #[arg(value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'D', long, global = true)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory and print its definitions - default command
    Scan(cli::scan::ScanArgs),

    /// List supported languages
    Languages,
}

fn init_logging(debug: bool, verbose: bool, logging: &LoggingConfig) {
    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the rendered catalog
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.format == "pretty" {
        builder.pretty().init();
    } else {
        builder.compact().init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shorthand: codemap <dir>
    let command = match (cli.command, cli.directory) {
        (Some(cmd), _) => cmd,
        (None, directory) => Commands::Scan(cli::scan::ScanArgs::for_directory(
            directory.unwrap_or_else(|| PathBuf::from(".")),
        )),
    };

    match command {
        Commands::Scan(args) => {
            let config = Config::from_project_dir(&args.directory);
            let logging = config.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
            init_logging(cli.debug, cli.verbose, &logging);

            let config = config?;
            info!("codemap v{} scanning {}", env!("CARGO_PKG_VERSION"), args.directory.display());
            cli::scan::run(args, config)?;
        }

        Commands::Languages => {
            init_logging(cli.debug, cli.verbose, &LoggingConfig::default());
            cli::languages::list_languages();
        }
    }

    Ok(())
}
