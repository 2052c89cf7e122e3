//! # CLI Module
//!
//! Command-line interface for the barcode renamer.
//!
//! ## Usage
//! ```bash
//! # Rename every image under a folder
//! barcode-rename ~/Specimens/Batch7
//!
//! # See what would happen first
//! barcode-rename ~/Specimens/Batch7 --dry-run
//!
//! # Reproducible suffixes, machine-readable report
//! barcode-rename ~/Specimens/Batch7 --sorted --output json
//! ```

use barcode_renamer::core::renamer::{RenameReport, Renamer};
use barcode_renamer::core::RESERVED_PREFIX;
use barcode_renamer::error::{BarcodeRenameError, Result};
use barcode_renamer::events::{Event, EventChannel, RenameEvent, RunEvent, ScanEvent};
use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// Rename specimen photographs after the barcodes on their labels
#[derive(Parser, Debug)]
#[command(name = "barcode-rename")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the image files
    folder_path: PathBuf,

    /// Show the renames without performing them
    #[arg(long)]
    dry_run: bool,

    /// Only process images directly inside the folder
    #[arg(long)]
    no_recursive: bool,

    /// Process files in name order so collision suffixes are reproducible
    #[arg(long)]
    sorted: bool,

    /// Ignore hidden files and directories
    #[arg(long)]
    skip_hidden: bool,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per file plus a summary
    Pretty,
    /// The full report as JSON
    Json,
    /// Tab-separated source and target of each rename
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    barcode_renamer::init_tracing(cli.verbose);

    let renamer = Renamer::builder()
        .root(&cli.folder_path)
        .recursive(!cli.no_recursive)
        .include_hidden(!cli.skip_hidden)
        .follow_symlinks(cli.follow_symlinks)
        .sort_entries(cli.sorted)
        .dry_run(cli.dry_run)
        .build();

    let (sender, receiver) = EventChannel::new();

    let progress = if cli.output == OutputFormat::Pretty {
        let pb = ProgressBar::new(0);
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(bar_style);
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let root = cli.folder_path.clone();

    // Print progress lines as the renamer reports them
    let event_thread = thread::spawn(move || {
        let Some(pb) = progress_clone else {
            // Drain so the sender never sees a full channel
            for _ in receiver.iter() {}
            return;
        };

        for event in receiver.iter() {
            match event {
                Event::Run(RunEvent::Started { dry_run: true }) => {
                    pb.suspend(|| {
                        println!("{}", style("Dry run: nothing will be renamed").yellow())
                    });
                }
                Event::Scan(ScanEvent::Started { root }) => {
                    pb.set_message(format!("Scanning {}", root.display()));
                }
                Event::Scan(ScanEvent::Completed { total_images }) => {
                    pb.set_length(total_images as u64);
                }
                Event::Scan(ScanEvent::Error { message, .. }) => {
                    pb.suspend(|| println!("{} {}", style("!").yellow(), message));
                }
                Event::Rename(RenameEvent::Decoding { path, index, .. }) => {
                    pb.set_position(index as u64);
                    pb.set_message(display_path(&root, &path));
                }
                Event::Rename(event) => {
                    let line = progress_line(&root, &event);
                    pb.suspend(|| println!("{}", line));
                    pb.inc(1);
                }
                Event::Run(RunEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = renamer.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let report = result?;

    match cli.output {
        OutputFormat::Pretty => print_pretty_summary(&Term::stdout(), &report),
        OutputFormat::Json => print_json_report(&report)?,
        OutputFormat::Minimal => print_minimal_report(&report),
    }

    match report.failed_count() {
        0 => Ok(()),
        failed => Err(BarcodeRenameError::Incomplete { failed }),
    }
}

fn progress_line(root: &Path, event: &RenameEvent) -> String {
    match event {
        RenameEvent::Renamed { from, to, dry_run } => {
            let verb = if *dry_run { "Would rename" } else { "Renamed" };
            format!(
                "{} {} to {}",
                style(verb).green(),
                display_path(root, from),
                style(file_name(to)).bold()
            )
        }
        RenameEvent::AlreadyNamed { path } => format!(
            "{} {} as it already matches its barcode",
            style("Keeping").dim(),
            display_path(root, path)
        ),
        RenameEvent::SkippedReservedPrefix { path } => format!(
            "{} {} as it already starts with '{}'",
            style("Skipping").dim(),
            display_path(root, path),
            RESERVED_PREFIX
        ),
        RenameEvent::SkippedNoBarcode { path } => format!(
            "{} {} as barcode data is empty",
            style("Skipping").yellow(),
            display_path(root, path)
        ),
        RenameEvent::Failed { path, message } => format!(
            "{} {}: {}",
            style("Failed").red().bold(),
            display_path(root, path),
            message
        ),
        RenameEvent::Decoding { path, .. } => display_path(root, path),
    }
}

fn print_pretty_summary(term: &Term, report: &RenameReport) {
    let summary = report.summary();

    term.write_line("").ok();
    let headline = if report.dry_run {
        "Dry run complete - nothing was renamed"
    } else {
        "Rename complete"
    };
    term.write_line(&format!("{} {}", style("✓").green().bold(), headline))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} images found in {:.1}s",
        style(summary.total_images).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!("  {} renamed", style(summary.renamed).cyan()))
        .ok();
    term.write_line(&format!("  {} skipped", style(summary.skipped).dim()))
        .ok();

    if summary.failed > 0 {
        term.write_line(&format!(
            "  {} failed (left under their original names)",
            style(summary.failed).red().bold()
        ))
        .ok();
    }

    if !report.scan_errors.is_empty() {
        term.write_line(&format!(
            "  {} entries could not be read",
            style(report.scan_errors.len()).yellow()
        ))
        .ok();
    }
}

fn print_json_report(report: &RenameReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| BarcodeRenameError::Report(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_minimal_report(report: &RenameReport) {
    for (source, target) in report.renames() {
        println!("{}\t{}", source.display(), target.display());
    }
}

/// Path relative to the folder being processed, for compact output
fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
