use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use toc_detect::core::detector::DocumentDetector;
use toc_detect::core::extractor::UniversalExtractor;
use toc_detect::utils::events::{init_logging, LogEventSink};
use toc_detect::DetectionFailure;

/// Run TOC detection on a single PDF or DOCX file and print what was found.
#[derive(Debug, Parser)]
#[command(name = "detect_one", version)]
struct Args {
    path: PathBuf,

    /// Print the result as JSON instead of one entry per line
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(None) {
        eprintln!("failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let detector = DocumentDetector::new(UniversalExtractor::new(), Arc::new(LogEventSink));
    let result = match detector.detect(&args.path) {
        Ok(result) => result,
        Err(e) => {
            let failure = DetectionFailure::from_error(&e);
            eprintln!("[{}] {}", failure.error_kind, failure.message);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to serialize result: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{} ({}): {} entries", result.source_path, result.format, result.entries.len());
        for (i, entry) in result.entries.iter().enumerate() {
            println!("[{}] {}", i + 1, entry);
        }
    }

    ExitCode::SUCCESS
}
