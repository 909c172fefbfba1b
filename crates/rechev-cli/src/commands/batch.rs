//! Batch command - extract plates from multiple files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use rechev_core::DocumentKind;

use super::extract::{extract_from_file, load_config, SourceKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// What the files contain
    #[arg(short, long, value_enum, default_value = "photo")]
    kind: SourceKind,

    /// Directory to write per-file JSON results into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Stop at the first failing file instead of continuing
    #[arg(long)]
    fail_fast: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    plate: Option<String>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let kind: DocumentKind = args.kind.into();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.input);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        pb.set_message(path.display().to_string());

        match extract_from_file(&path, kind, &config).await {
            Ok(result) => {
                debug!(path = %path.display(), plate = ?result.plate, "processed");

                if let Some(dir) = &args.output_dir {
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "result".to_string());
                    let out_path = dir.join(format!("{name}.json"));
                    fs::write(&out_path, serde_json::to_string_pretty(&result)?)?;
                }

                results.push(FileResult {
                    path,
                    plate: result.plate,
                    error: None,
                });
            }
            Err(e) => {
                error!(path = %path.display(), "failed: {e:#}");
                if args.fail_fast {
                    pb.abandon();
                    return Err(e);
                }
                results.push(FileResult {
                    path,
                    plate: None,
                    error: Some(format!("{e:#}")),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    // Summary
    let found = results.iter().filter(|r| r.plate.is_some()).count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    println!();
    for result in &results {
        let status = match (&result.plate, &result.error) {
            (Some(plate), _) => format!("{} {}", style("✓").green(), plate),
            (None, Some(err)) => format!("{} {}", style("error").red(), err),
            (None, None) => format!("{}", style("no plate found").yellow()),
        };
        println!("{:<40} {}", result.path.display(), status);
    }

    println!();
    println!(
        "{} {} of {} files yielded a plate ({} errors) in {:.1?}",
        style("ℹ").blue(),
        found,
        results.len(),
        failed,
        start.elapsed()
    );

    Ok(())
}
