use clap::Parser;
use log::error;
use std::process::ExitCode;
use toc_detect::config::Config;
use toc_detect::utils::document_processor::run_document_processing;
use toc_detect::utils::events::init_logging;

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = init_logging(config.log_file.as_deref()) {
        eprintln!("failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run_document_processing(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
