use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use codemap::config::Config;
use codemap::{scan_with, DetailLevel, OutputFormat};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// File glob patterns (repeatable), e.g. -p '*.ts' -p '*.py'
    #[arg(short, long = "pattern", value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Directory or file names to skip (repeatable)
    #[arg(short, long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Detail level
    #[arg(short, long, value_enum)]
    pub detail: Option<DetailLevel>,

    /// Keep only these kinds (comma-separated), plus their ancestors
    #[arg(long, value_delimiter = ',')]
    pub include_types: Vec<String>,

    /// Drop these kinds (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_types: Vec<String>,

    /// Require one of these modifier tokens (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub include_modifiers: Vec<String>,

    /// Drop definitions carrying any of these modifier tokens (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_modifiers: Vec<String>,

    /// Keep names matching this regex
    #[arg(long, value_name = "REGEX")]
    pub name_pattern: Option<String>,

    /// Drop names matching this regex
    #[arg(long, value_name = "REGEX")]
    pub exclude_name_pattern: Option<String>,

    #[arg(long)]
    pub min_complexity: Option<u32>,

    #[arg(long)]
    pub max_complexity: Option<u32>,

    #[arg(long)]
    pub min_parameters: Option<usize>,

    #[arg(long)]
    pub max_parameters: Option<usize>,

    /// Worker threads
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show a progress indicator on stderr
    #[arg(long)]
    pub progress: bool,
}

impl ScanArgs {
    /// Arguments equivalent to `codemap scan <directory>`
    pub fn for_directory(directory: PathBuf) -> Self {
        Self {
            directory,
            patterns: Vec::new(),
            exclude: Vec::new(),
            format: None,
            detail: None,
            include_types: Vec::new(),
            exclude_types: Vec::new(),
            include_modifiers: Vec::new(),
            exclude_modifiers: Vec::new(),
            name_pattern: None,
            exclude_name_pattern: None,
            min_complexity: None,
            max_complexity: None,
            min_parameters: None,
            max_parameters: None,
            threads: None,
            output: None,
            progress: false,
        }
    }
}

/// Command-line values override the ones from `.codemap.toml`
fn merge_options(args: &ScanArgs, config: &Config) -> codemap::ScanOptions {
    let mut options = config.scan_options();
    if !args.patterns.is_empty() {
        options.file_patterns = args.patterns.clone();
    }
    if !args.exclude.is_empty() {
        options.exclude = args.exclude.clone();
    }
    if let Some(format) = args.format {
        options.format = format;
    }
    if let Some(detail) = args.detail {
        options.detail = detail;
    }
    if let Some(threads) = args.threads {
        options.threads = threads;
    }

    let filter = &mut options.filter;
    if !args.include_types.is_empty() {
        filter.include_types = args.include_types.clone();
    }
    if !args.exclude_types.is_empty() {
        filter.exclude_types = args.exclude_types.clone();
    }
    if !args.include_modifiers.is_empty() {
        filter.include_modifiers = args.include_modifiers.clone();
    }
    if !args.exclude_modifiers.is_empty() {
        filter.exclude_modifiers = args.exclude_modifiers.clone();
    }
    if args.name_pattern.is_some() {
        filter.name_pattern = args.name_pattern.clone();
    }
    if args.exclude_name_pattern.is_some() {
        filter.exclude_name_pattern = args.exclude_name_pattern.clone();
    }
    filter.min_complexity = args.min_complexity.or(filter.min_complexity);
    filter.max_complexity = args.max_complexity.or(filter.max_complexity);
    filter.min_parameters = args.min_parameters.or(filter.min_parameters);
    filter.max_parameters = args.max_parameters.or(filter.max_parameters);

    options
}

pub fn run(args: ScanArgs, config: Config) -> Result<()> {
    let options = merge_options(&args, &config);

    let progress = args.progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    });
    let report = |path: &str| {
        if let Some(pb) = &progress {
            pb.inc(1);
            pb.set_message(path.to_string());
        }
    };

    let rendered = scan_with(&args.directory, &options, Some(&report))
        .with_context(|| format!("Failed to scan {}", args.directory.display()))?;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} output to {}", options.format, path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
