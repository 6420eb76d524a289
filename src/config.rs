use crate::core::batch::DEFAULT_MAX_WORKERS;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "data/sample_documents";
pub const DEFAULT_OUTPUT_FILE: &str = "data/processed_data/detected_tocs.json";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Processed multiple sample files for TOC detection";

/// Batch TOC detection over a directory of PDF and DOCX files.
///
/// Every flag can also be set through the matching `TOC_DETECT_*` variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "toc_detect", version)]
pub struct Config {
    /// Directory whose .pdf/.docx files make up the batch
    #[arg(long, env = "TOC_DETECT_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// JSON file receiving the detection results
    #[arg(long, env = "TOC_DETECT_OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Number of documents processed in parallel
    #[arg(long, env = "TOC_DETECT_MAX_WORKERS", default_value_t = DEFAULT_MAX_WORKERS)]
    pub max_workers: usize,

    #[arg(long, env = "TOC_DETECT_COMMIT_MESSAGE", default_value = DEFAULT_COMMIT_MESSAGE)]
    pub commit_message: String,

    #[arg(long, env = "TOC_DETECT_GIT_REMOTE", default_value = "origin")]
    pub git_remote: String,

    #[arg(long, env = "TOC_DETECT_GIT_BRANCH", default_value = "master")]
    pub git_branch: String,

    /// Skip the commit/push after the results are written
    #[arg(long, env = "TOC_DETECT_NO_PUSH")]
    pub no_push: bool,

    /// Append log output to this file instead of stderr
    #[arg(long, env = "TOC_DETECT_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
