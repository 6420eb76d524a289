use crate::config::Config;
use crate::core::batch::{BatchOutcome, BatchProcessor};
use crate::core::detector::DocumentDetector;
use crate::core::extractor::{TextExtractor, UniversalExtractor};
use crate::core::sink::{JsonFileSink, ResultSink};
use crate::utils::events::LogEventSink;
use crate::utils::git_hook::{GitPushHook, NoopHook, PostBatchHook};
use crate::DocumentFormat;
use anyhow::{bail, Context, Result};
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory-level pipeline: enumerate inputs, run the batch, persist the
/// successes, then run the post-batch hook.
pub struct DocumentProcessor<X> {
    batch: BatchProcessor<X>,
    sink: Box<dyn ResultSink>,
    hook: Box<dyn PostBatchHook>,
}

impl<X: TextExtractor> DocumentProcessor<X> {
    pub fn new(batch: BatchProcessor<X>, sink: Box<dyn ResultSink>, hook: Box<dyn PostBatchHook>) -> Self {
        Self { batch, sink, hook }
    }

    /// Fails if `input_dir` is missing, holds no eligible file, or the
    /// results cannot be written. Per-file failures and hook failures are
    /// logged only.
    pub fn process_documents(&self, input_dir: &Path) -> Result<BatchOutcome> {
        info!("Starting to process documents from: {}", input_dir.display());

        let inputs = enumerate_inputs(input_dir)?;
        if inputs.is_empty() {
            bail!("no PDF or DOCX files found in {}", input_dir.display());
        }
        info!("Found {} files to process", inputs.len());

        let outcome = self.batch.process(&inputs);

        // A persistence error is returned, not logged; the caller reports it
        self.sink
            .persist(&outcome.results)
            .context("detection results were not written")?;

        if let Err(e) = self.hook.run(self.sink.location()) {
            error!("Post-batch commit/push failed: {e}");
        }

        info!("Completed processing all documents");
        Ok(outcome)
    }
}

/// Every `.pdf`/`.docx` file directly inside `dir`, sorted by path.
/// Other entries are skipped silently.
pub fn enumerate_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("input directory not found: {}", dir.display());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .context("Failed to read directory entry")?
            .path();
        if path.is_file() && DocumentFormat::from_path(&path).is_some() {
            inputs.push(path);
        } else {
            debug!("Skipping non-document entry: {}", path.display());
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Build the production pipeline from `config` and run it.
pub fn run_document_processing(config: &Config) -> Result<BatchOutcome> {
    let detector = DocumentDetector::new(UniversalExtractor::new(), Arc::new(LogEventSink));
    let batch = BatchProcessor::new(detector, config.max_workers)?;

    let hook: Box<dyn PostBatchHook> = if config.no_push {
        Box::new(NoopHook)
    } else {
        let repo_dir = std::env::current_dir().context("cannot resolve working directory")?;
        Box::new(
            GitPushHook::new(repo_dir, config.commit_message.clone())
                .with_remote(config.git_remote.clone(), config.git_branch.clone()),
        )
    };

    let processor = DocumentProcessor::new(
        batch,
        Box::new(JsonFileSink::new(config.output_file.clone())),
        hook,
    );
    processor.process_documents(&config.input_dir)
}
