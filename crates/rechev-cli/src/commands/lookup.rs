//! Lookup command - aggregate the government datasets for a plate.

use clap::Args;
use console::style;

use crate::govil::GovilClient;

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// Plate number (separators allowed, they are stripped)
    #[arg(required = true)]
    plate: String,

    /// Print the full aggregated report as JSON (default is a summary)
    #[arg(long)]
    json: bool,
}

pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    let client = GovilClient::new();
    let report = client.vehicle_report(&args.plate).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let field = |key: &str| {
        report
            .registration
            .get(key)
            .and_then(|v| v.as_str().map(str::to_string).or_else(|| Some(v.to_string())))
            .unwrap_or_default()
    };

    println!("{} {}", style("Plate:").bold(), report.plate);
    println!("{} {} {}", style("Vehicle:").bold(), field("tozeret_nm"), field("kinuy_mishari"));
    println!("{} {}", style("Model year:").bold(), field("shnat_yitzur"));
    println!("{} {}", style("Color:").bold(), field("tzeva_rechev"));
    println!("{} {}", style("Fuel:").bold(), field("sug_delek_nm"));
    println!("{} {}", style("Ownership:").bold(), field("baalut"));
    println!(
        "{} {} (last change {})",
        style("Hands:").bold(),
        report.ownership_count,
        report.last_ownership_change.as_deref().unwrap_or("-")
    );

    if report.inactive {
        println!("{}", style("Vehicle is listed as inactive").red());
    }
    if report.service_overdue {
        println!("{}", style("License validity date has passed").red());
    }
    if report.scrapped {
        println!(
            "{} ({})",
            style("Vehicle is scrapped").red(),
            report.scrapped_date.as_deref().unwrap_or("-")
        );
    }
    if !report.recalls.is_empty() {
        println!(
            "{} {} open recall(s)",
            style("⚠").yellow(),
            report.recalls.len()
        );
    }

    Ok(())
}
