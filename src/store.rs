//! High-score persistence.
//!
//! Failures never reach gameplay: a score that cannot be read counts as 0
//! and a save that fails is skipped, both with a warning in the log.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) {
        (**self).save(score)
    }
}

// ── File-backed store ─────────────────────────────────────────────────────────

/// Plain-text score file, one decimal integer.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.space_invaders_score`, or the working directory when `HOME`
    /// is unset.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".space_invaders_score")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<u32, StoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        let trimmed = content.trim();
        trimmed
            .parse()
            .map_err(|_| StoreError::Corrupt(trimmed.to_string()))
    }

    pub fn try_save(&self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(StoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => 0,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "high score unavailable: {err}");
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(err) = self.try_save(score) {
            tracing::warn!(path = %self.path.display(), score, "high score not saved: {err}");
        }
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Keeps the score for the lifetime of the process only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    score: Option<u32>,
    saves: u32,
}

impl MemoryScoreStore {
    pub fn with_score(score: u32) -> Self {
        Self {
            score: Some(score),
            saves: 0,
        }
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u32) {
        self.score = Some(score);
        self.saves += 1;
    }
}
