use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub const RESULTS_FILE: &str = "results.html";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("output directory {path:?} is unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Writes the results document so that readers never observe a partial file:
/// the content goes to a temp file in the same directory, which then replaces
/// the target.
#[derive(Debug, Clone)]
pub struct ResultsPublisher {
    dir: PathBuf,
}

impl ResultsPublisher {
    /// Creates `dir` if needed and checks that it accepts new files.
    pub fn create(dir: &Path) -> Result<Self, PublishError> {
        let unusable = |reason: String| PublishError::OutputDir {
            path: dir.to_path_buf(),
            reason,
        };
        if dir.exists() && !dir.is_dir() {
            return Err(unusable("path is not a directory".into()));
        }
        fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
        NamedTempFile::new_in(dir).map_err(|e| unusable(e.to_string()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn target(&self) -> PathBuf {
        self.dir.join(RESULTS_FILE)
    }

    pub fn publish(&self, document: &str) -> Result<PathBuf, PublishError> {
        let target = self.target();
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PublishError::Io(e.error))?;
        Ok(target)
    }
}
