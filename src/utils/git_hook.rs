use crate::error::HookError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Side effect run once after a batch has been persisted.
pub trait PostBatchHook {
    fn run(&self, output: &Path) -> Result<(), HookError>;
}

/// Does nothing; used with `--no-push`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl PostBatchHook for NoopHook {
    fn run(&self, _output: &Path) -> Result<(), HookError> {
        Ok(())
    }
}

/// Stages the output file, commits it and pushes to `remote`/`branch`.
#[derive(Debug, Clone)]
pub struct GitPushHook {
    pub repo_dir: PathBuf,
    pub message: String,
    pub remote: String,
    pub branch: String,
}

impl GitPushHook {
    pub fn new(repo_dir: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            message: message.into(),
            remote: "origin".to_string(),
            branch: "master".to_string(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>, branch: impl Into<String>) -> Self {
        self.remote = remote.into();
        self.branch = branch.into();
        self
    }

    fn git(&self, step: &'static str, args: &[&OsStr]) -> Result<(), HookError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .arg(step)
            .args(args)
            .output()
            .map_err(|source| HookError::Spawn { step, source })?;

        if !output.status.success() {
            return Err(HookError::Failed {
                step,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        log::debug!("git {step} succeeded");
        Ok(())
    }
}

impl PostBatchHook for GitPushHook {
    fn run(&self, output: &Path) -> Result<(), HookError> {
        self.git("add", &[output.as_os_str()])?;
        self.git("commit", &[OsStr::new("-m"), OsStr::new(&self.message)])?;
        self.git("push", &[OsStr::new(&self.remote), OsStr::new(&self.branch)])?;
        log::info!("Changes committed and pushed to {}/{}", self.remote, self.branch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_a_repository_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("detected_tocs.json");
        std::fs::write(&output, "[]").unwrap();

        let hook = GitPushHook::new(dir.path(), "Processed files for TOC detection");
        // either git is missing (Spawn) or the directory is not a repo (Failed)
        assert!(hook.run(&output).is_err());
    }

    #[test]
    fn test_noop_hook() {
        assert!(NoopHook.run(Path::new("anything.json")).is_ok());
    }

    #[test]
    fn test_with_remote() {
        let hook = GitPushHook::new(".", "msg").with_remote("upstream", "main");
        assert_eq!(hook.remote, "upstream");
        assert_eq!(hook.branch, "main");
    }
}
