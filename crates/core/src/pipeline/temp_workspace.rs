use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::shared::constants::TEMP_PREFIX;

/// Role of a scratch file inside a [`TempWorkspace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempRole {
    GainAdjusted,
    SynthesisOutput,
    Preview,
}

impl TempRole {
    pub fn file_name(&self) -> &'static str {
        match self {
            TempRole::GainAdjusted => "gain-adjusted.wav",
            TempRole::SynthesisOutput => "synthesis-output.wav",
            TempRole::Preview => "preview.wav",
        }
    }
}

/// Uniquely named scratch directory owned by one pipeline run.
///
/// Everything inside is deleted when the workspace is released or dropped,
/// whichever comes first, so every exit path cleans up.
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    /// Creates the workspace under `root`, or under the system temp
    /// directory when `root` is `None`.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX);
        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        log::debug!("Created scratch workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, role: TempRole) -> PathBuf {
        self.dir.path().join(role.file_name())
    }

    /// Deletes the workspace now. Failures are logged, never raised, so
    /// cleanup cannot mask the run's own result.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            log::warn!("Failed to remove scratch workspace {}: {e}", path.display());
        }
    }
}
