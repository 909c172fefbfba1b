//! Extract command - read a license plate from a single file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use rechev_core::models::config::RechevConfig;
use rechev_core::plate::PlateExtractor;
use rechev_core::source::{PdfTextSource, TextSource};
use rechev_core::{DocumentKind, ExtractionResult};

use crate::vision::VisionTextSource;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (image, PDF, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// What the file contains
    #[arg(short, long, value_enum, default_value = "photo")]
    kind: SourceKind,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also print the raw extracted text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SourceKind {
    /// A photographed plate
    Photo,
    /// A vehicle registration document (רישיון רכב)
    Document,
}

impl From<SourceKind> for DocumentKind {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Photo => DocumentKind::Photo,
            SourceKind::Document => DocumentKind::RegistrationDocument,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let kind: DocumentKind = args.kind.into();
    let result = extract_from_file(&args.input, kind, &config).await?;

    if args.show_text {
        eprintln!("{}", style("--- extracted text ---").dim());
        eprintln!("{}", result.raw_text);
        eprintln!("{}", style("--- end ---").dim());
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Load configuration from an explicit path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RechevConfig> {
    match config_path {
        Some(path) => RechevConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load config from {path}")),
        None => Ok(RechevConfig::default()),
    }
}

/// Obtain text for `path` via the appropriate source and run the engine.
pub async fn extract_from_file(
    path: &Path,
    kind: DocumentKind,
    config: &RechevConfig,
) -> anyhow::Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            PdfTextSource::new()
                .with_min_text_length(config.source.min_text_length)
                .extract_text(&data)
                .with_context(|| format!("text extraction failed for {}", path.display()))?
        }
        "txt" => fs::read_to_string(path)?,
        "jpg" | "jpeg" | "png" | "webp" => {
            let data = fs::read(path)?;
            let source = VisionTextSource::from_env(&config.source.api_key_env)?;
            source.extract_text(&data).await?
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    debug!(chars = text.len(), "text obtained, running extraction engine");

    let extractor = PlateExtractor::with_config(&config.extraction);
    Ok(extractor.extract(&text, kind))
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(match &result.plate {
            Some(plate) => format!("{} {}", style("✓").green(), plate),
            None => format!("{} no plate found", style("✗").yellow()),
        }),
    }
}
