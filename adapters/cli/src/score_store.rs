//! Best-score persistence backed by a single plain-text file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// File holding the highest final score seen so far as a decimal integer.
#[derive(Clone, Debug)]
pub(crate) struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored best score. A missing file counts as zero.
    pub(crate) fn load(&self) -> Result<u64> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read best score from {}", self.path.display())
                })
            }
        };
        contents
            .trim()
            .parse()
            .with_context(|| format!("best score file {} is corrupt", self.path.display()))
    }

    /// Stores `score` if it beats the current best. Returns whether it did.
    pub(crate) fn record(&self, score: u64) -> Result<bool> {
        if score <= self.load()? {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("failed to write best score to {}", self.path.display()))?;
        Ok(true)
    }
}
