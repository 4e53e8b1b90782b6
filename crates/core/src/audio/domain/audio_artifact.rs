use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where an artifact's encoded bytes live.
#[derive(Clone, Debug)]
pub enum ArtifactSource {
    Memory(Arc<[u8]>),
    File(PathBuf),
}

impl ArtifactSource {
    pub fn memory(bytes: impl Into<Arc<[u8]>>) -> Self {
        ArtifactSource::Memory(bytes.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        ArtifactSource::File(path.into())
    }

    /// Human-readable origin for log and error messages.
    pub fn describe(&self) -> String {
        match self {
            ArtifactSource::Memory(bytes) => format!("in-memory audio ({} bytes)", bytes.len()),
            ArtifactSource::File(path) => path.display().to_string(),
        }
    }
}

/// Format facts read from the container header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration: f64,
}

/// Read-only handle to a complete encoded audio file.
///
/// Artifacts are never modified: every transform produces a new one, and
/// cloning shares the underlying buffer.
#[derive(Clone, Debug)]
pub struct AudioArtifact {
    source: ArtifactSource,
    info: AudioInfo,
}

impl AudioArtifact {
    pub fn new(source: ArtifactSource, info: AudioInfo) -> Self {
        Self { source, info }
    }

    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    pub fn info(&self) -> AudioInfo {
        self.info
    }

    pub fn sample_rate(&self) -> u32 {
        self.info.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.info.channels
    }

    pub fn duration(&self) -> f64 {
        self.info.duration
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ArtifactSource::File(path) => Some(path),
            ArtifactSource::Memory(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// The encoded bytes, borrowed for in-memory artifacts and read from disk otherwise.
    pub fn bytes(&self) -> std::io::Result<Cow<'_, [u8]>> {
        match &self.source {
            ArtifactSource::Memory(bytes) => Ok(Cow::Borrowed(&bytes[..])),
            ArtifactSource::File(path) => std::fs::read(path).map(Cow::Owned),
        }
    }
}
