//! Lint command - Lint Angular template documents

use clap::Args;
use glob::glob;
use ignore::Walk;
use lacquer_patina::{
    format_results, format_summary, load_document, LintConfig, LintResult, LintSummary, Linter,
    OutputFormat, DOCUMENT_SUFFIX,
};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Default glob for serialized template documents
const DEFAULT_PATTERN: &str = "./**/*.ast.json";

/// Suffix of the file written by `--fix`
const FIXED_SUFFIX: &str = ".fixed.html";

#[derive(Args)]
pub struct LintArgs {
    /// Glob pattern(s) or directories to search for *.ast.json documents
    #[arg(default_value = DEFAULT_PATTERN)]
    pub patterns: Vec<String>,

    /// Write fixed templates next to each document as <name>.fixed.html
    #[arg(long)]
    pub fix: bool,

    /// Directory containing lacquer.config.json (default: current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Quiet mode - only show summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Log progress to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            patterns: vec![DEFAULT_PATTERN.to_string()],
            fix: false,
            config: None,
            format: "text".to_string(),
            max_warnings: None,
            quiet: false,
            verbose: false,
        }
    }
}

/// A document that was loaded and linted
struct LintedFile {
    path: PathBuf,
    source: String,
    result: LintResult,
}

pub fn run(args: LintArgs) {
    init_logging(args.verbose);
    let start = Instant::now();

    let files = collect_documents(&args.patterns);
    if files.is_empty() {
        eprintln!(
            "No {} files found matching patterns: {:?}",
            DOCUMENT_SUFFIX, args.patterns
        );
        return;
    }
    tracing::info!("found {} document(s)", files.len());

    let linter = match LintConfig::load(args.config.as_deref())
        .and_then(|config| Linter::new().with_config(&config))
    {
        Ok(linter) => linter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let failed_count = AtomicUsize::new(0);

    // Lint all documents in parallel, keeping input order
    let linted: Vec<LintedFile> = files
        .par_iter()
        .filter_map(|path| {
            let root = match load_document(path) {
                Ok(root) => root,
                Err(e) => {
                    eprintln!("{}", e);
                    failed_count.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            };

            let filename = path.to_string_lossy().to_string();
            let result = linter.lint_template(&root, &filename);

            Some(LintedFile {
                path: path.clone(),
                source: root.source,
                result,
            })
        })
        .collect();

    let mut summary = LintSummary {
        file_count: linted.len(),
        ..LintSummary::default()
    };
    for diagnostic in linted.iter().flat_map(|f| &f.result.diagnostics) {
        summary.add(diagnostic);
    }
    let mut total_failed = failed_count.load(Ordering::Relaxed);

    let format = OutputFormat::from_name(&args.format);

    if !args.quiet || summary.error_count > 0 || summary.warning_count > 0 {
        let results: Vec<_> = linted.iter().map(|f| f.result.clone()).collect();
        let sources: Vec<_> = linted
            .iter()
            .map(|f| (f.result.filename.clone(), f.source.clone()))
            .collect();

        let output = format_results(&results, &sources, format);
        if !output.trim().is_empty() {
            print!("{}", output);
        }
    }

    if args.fix {
        let (written, write_failures) = write_fixes(&linted);
        total_failed += write_failures;
        if format == OutputFormat::Text {
            println!("\nWrote {} fixed template(s)", written);
        }
    }

    let elapsed = start.elapsed();
    if format == OutputFormat::Text {
        println!("\n{}", format_summary(&summary));
        println!("Linted {} files in {:.4?}", linted.len(), elapsed);
    }

    if summary.has_errors() || total_failed > 0 {
        std::process::exit(1);
    }

    if let Some(max) = args.max_warnings {
        if summary.warning_count > max {
            eprintln!(
                "\nToo many warnings ({} > max {})",
                summary.warning_count, max
            );
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Expand glob patterns and directories into document paths
fn collect_documents(patterns: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| {
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|r| r.ok())
                    .filter(|p| {
                        is_document(p) && !p.components().any(|c| c.as_os_str() == "node_modules")
                    })
                    .collect::<Vec<_>>()
            } else {
                // Directories are walked (respects .gitignore), plain files are taken as-is
                Walk::new(pattern)
                    .filter_map(|e| e.ok())
                    .filter(|e| is_document(e.path()))
                    .map(|e| e.path().to_path_buf())
                    .collect::<Vec<_>>()
            }
        })
        .collect();

    files.sort();
    files.dedup();
    files
}

#[inline]
fn is_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX))
}

/// `form.ast.json` -> `form.fixed.html` in the same directory
fn fixed_output_path(document: &Path) -> Option<PathBuf> {
    let name = document.file_name()?.to_str()?;
    let stem = name.strip_suffix(DOCUMENT_SUFFIX)?;
    Some(document.with_file_name(format!("{}{}", stem, FIXED_SUFFIX)))
}

/// Write the fixed source of every file that has applicable fixes.
///
/// Returns the number of files written and the number of failed writes.
fn write_fixes(linted: &[LintedFile]) -> (usize, usize) {
    let mut written = 0;
    let mut failed = 0;

    for file in linted {
        if file.result.fixable_count() == 0 {
            continue;
        }

        let outcome = file.result.apply_fixes(&file.source);
        if outcome.skipped > 0 {
            tracing::warn!(
                "{}: skipped {} overlapping fix(es)",
                file.path.display(),
                outcome.skipped
            );
        }
        if outcome.applied == 0 {
            continue;
        }

        let Some(target) = fixed_output_path(&file.path) else {
            continue;
        };
        match fs::write(&target, &outcome.output) {
            Ok(()) => {
                tracing::info!(
                    "{}: applied {} fix(es)",
                    target.display(),
                    outcome.applied
                );
                written += 1;
            }
            Err(e) => {
                eprintln!("Failed to write {}: {}", target.display(), e);
                failed += 1;
            }
        }
    }

    (written, failed)
}
