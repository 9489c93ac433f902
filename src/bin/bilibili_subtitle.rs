//! Bilibili subtitle extractor.
//!
//! stdout receives the rendered subtitle text. stderr receives exactly one
//! JSON line: the run metadata on success, an error object on failure.

use ai_weekly_tools::cli::SubtitleCli;
use ai_weekly_tools::errors::SubtitleError;
use ai_weekly_tools::outputs::json::{error_line, metadata_line};
use ai_weekly_tools::scrapers::bilibili::BilibiliClient;
use ai_weekly_tools::utils::init_tracing;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("warn");

    let args = match SubtitleCli::try_parse() {
        Ok(args) => args,
        // --help and --version go to stdout with status 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };
    debug!(?args, "Parsed CLI arguments");

    let request = args.to_request();
    let client = match BilibiliClient::new(Duration::from_secs(args.timeout)) {
        Ok(client) => client,
        Err(source) => {
            let e = SubtitleError::FetchError {
                url: request.url,
                source,
            };
            eprintln!("{}", error_line(&e));
            return ExitCode::FAILURE;
        }
    };
    let report = match client.extract(&request).await {
        Ok(report) => report,
        Err(e) => {
            debug!(kind = e.kind(), error = %e, "Extraction failed");
            eprintln!("{}", error_line(&e));
            return ExitCode::FAILURE;
        }
    };

    match metadata_line(&report.metadata) {
        Ok(line) => eprintln!("{line}"),
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": format!("Failed to serialize metadata: {e}") }));
            return ExitCode::FAILURE;
        }
    }
    println!("{}", report.text);

    ExitCode::SUCCESS
}
