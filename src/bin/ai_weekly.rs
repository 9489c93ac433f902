//! Weekly AI developer report template generator.
//!
//! Prints a markdown skeleton with date-scoped search queries for the current
//! Monday-to-Sunday week. Results are filled in by hand afterwards.

use ai_weekly_tools::cli::WeeklyCli;
use ai_weekly_tools::outputs::markdown::render_report;
use ai_weekly_tools::utils::{init_tracing, write_output_file};
use ai_weekly_tools::weekly::week_range;
use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing("warn");

    let args = WeeklyCli::parse();
    debug!(?args.date, ?args.output, ignored = ?args.ignored, "Parsed CLI arguments");

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let range = week_range(today);
    info!(start = %range.start, end = %range.end, today = %range.today, "Computed week range");

    let report = render_report(&range);
    match &args.output {
        Some(path) => write_output_file(path, &report).await?,
        None => println!("{report}"),
    }

    Ok(())
}
