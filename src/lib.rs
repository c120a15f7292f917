//! Structural catalog of source code.
//!
//! Scans a directory, extracts definitions (functions, classes, methods,
//! variables and so on) with tree-sitter queries, links them into a
//! hierarchy, filters them and renders the result as XML, Markdown or JSON.
//!
//! ```no_run
//! use codemap::{scan, DetailLevel, FilterOptions, OutputFormat};
//!
//! let filter = FilterOptions {
//!     include_types: vec!["method".to_string()],
//!     ..Default::default()
//! };
//! let patterns = vec!["*.ts".to_string()];
//! let markdown = scan("src", &patterns, OutputFormat::Markdown, DetailLevel::Standard, filter)?;
//! println!("{}", markdown);
//! # Ok::<(), codemap::ScanError>(())
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod indexer;
pub mod query;
pub mod render;

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

pub use error::{Result, ScanError};
pub use index::{Definition, DefinitionKind, Parameter};
pub use indexer::Indexer;
pub use query::{DefinitionFilter, FilterOptions};
pub use render::{DetailLevel, FileDefinitions, OutputFormat};

use indexer::discovery::{discover_files, DEFAULT_EXCLUDES};
use indexer::languages::BuiltinLanguages;

/// Everything a scan needs besides the directory
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Glob patterns selecting files; empty means every supported extension
    pub file_patterns: Vec<String>,
    /// Directory or file names (or globs) pruned from the walk
    pub exclude: Vec<String>,
    pub format: OutputFormat,
    pub detail: DetailLevel,
    pub filter: FilterOptions,
    /// Worker threads for per-file parsing
    pub threads: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            file_patterns: Vec::new(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            format: OutputFormat::default(),
            detail: DetailLevel::default(),
            filter: FilterOptions::default(),
            threads: 4,
        }
    }
}

/// Per-file progress notification, called with each relative path once
/// that file is indexed
pub type ProgressFn<'a> = &'a (dyn Fn(&str) + Sync);

/// Scan `directory` and render the filtered catalog
pub fn scan(
    directory: impl AsRef<Path>,
    file_patterns: &[String],
    format: OutputFormat,
    detail: DetailLevel,
    filter: FilterOptions,
) -> Result<String> {
    let options = ScanOptions {
        file_patterns: file_patterns.to_vec(),
        format,
        detail,
        filter,
        ..ScanOptions::default()
    };
    scan_with(directory.as_ref(), &options, None)
}

/// [`scan`] with excludes, thread count and progress reporting
pub fn scan_with(
    directory: &Path,
    options: &ScanOptions,
    progress: Option<ProgressFn<'_>>,
) -> Result<String> {
    let files = collect_definitions(directory, options, progress)?;
    render::render(&files, options.format, options.detail)
}

/// Discover, index and filter, stopping short of rendering
pub fn collect_definitions(
    directory: &Path,
    options: &ScanOptions,
    progress: Option<ProgressFn<'_>>,
) -> Result<FileDefinitions> {
    if options.threads == 0 {
        return Err(ScanError::InvalidArgument(
            "thread count must be greater than 0".to_string(),
        ));
    }
    options.filter.validate()?;

    let patterns = if options.file_patterns.is_empty() {
        BuiltinLanguages::global().default_patterns()
    } else {
        options.file_patterns.clone()
    };
    let paths = discover_files(directory, &patterns, &options.exclude)?;
    info!("Scanning {} files in {}", paths.len(), directory.display());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .map_err(|e| ScanError::InvalidArgument(format!("cannot start worker pool: {}", e)))?;

    let indexer = Indexer::builtin();
    let indexed: FileDefinitions = pool.install(|| {
        paths
            .par_iter()
            .map(|relative| {
                let definitions = indexer.index_file(&directory.join(relative));
                if let Some(report) = progress {
                    report(relative);
                }
                (relative.clone(), definitions)
            })
            .collect()
    });

    let filter = DefinitionFilter::new(options.filter.clone());
    let filtered: FileDefinitions = indexed
        .into_iter()
        .map(|(path, definitions)| {
            let kept = filter.apply(&definitions);
            debug!("{}: kept {} of {} definitions", path, kept.len(), definitions.len());
            (path, kept)
        })
        .collect();

    Ok(filtered)
}
