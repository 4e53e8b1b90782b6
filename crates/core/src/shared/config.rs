use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::infrastructure::ffmpeg_transform_executor::DEFAULT_FFMPEG_BINARY;
use crate::shared::constants::{
    APP_NAME, DEFAULT_LANGUAGE, OUTPUT_DIR_NAME, SPEAKER_DIR_NAME, VOCABULARY_FILE_NAME,
};
use crate::synthesis::infrastructure::coqui_tts_synthesizer::{DEFAULT_TTS_BINARY, XTTS_V2_MODEL};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Studio settings: where voices, exports, and the vocabulary live, and which
/// external tools to run. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub speaker_dir: PathBuf,
    pub output_dir: PathBuf,
    pub vocabulary_path: PathBuf,
    pub language: String,
    pub tts_binary: PathBuf,
    pub tts_model: String,
    pub ffmpeg_binary: PathBuf,
    /// Parent of per-run scratch directories; the system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            speaker_dir: PathBuf::from(SPEAKER_DIR_NAME),
            output_dir: PathBuf::from(OUTPUT_DIR_NAME),
            vocabulary_path: PathBuf::from(VOCABULARY_FILE_NAME),
            language: DEFAULT_LANGUAGE.to_string(),
            tts_binary: PathBuf::from(DEFAULT_TTS_BINARY),
            tts_model: XTTS_V2_MODEL.to_string(),
            ffmpeg_binary: PathBuf::from(DEFAULT_FFMPEG_BINARY),
            temp_dir: None,
        }
    }
}

impl StudioConfig {
    /// `<config dir>/NovaStudio/settings.json`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join("settings.json"))
    }

    /// Settings from the default location, or defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("{e}; using default settings");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        fs::write(path, json).map_err(write_err)
    }
}
