use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::audio::domain::audio_artifact::{ArtifactSource, AudioArtifact};
use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::filter_error::FilterError;
use crate::audio::domain::filter_request::FilterRequest;
use crate::shared::constants::{DEFAULT_TTS_TEXT, EXPORT_NAME_PREFIX, OUTPUT_EXTENSION};
use crate::synthesis::domain::synthesis_error::SynthesisError;
use crate::text::domain::pronunciation_vocabulary::PronunciationVocabulary;
use crate::text::domain::text_tools;

use super::apply_filters_use_case::ApplyFiltersUseCase;
use super::synthesize_base_use_case::SynthesizeBaseUseCase;
use super::temp_workspace::{TempRole, TempWorkspace};

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("no base audio: generate speech or load a WAV file first")]
    NoBaseAudio,
    #[error("export name is empty")]
    EmptyExportName,
    #[error("export name '{0}' must not contain path separators")]
    InvalidExportName(String),
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Filtered audio kept in memory together with the settings that made it.
#[derive(Clone, Debug)]
pub struct FilteredPreview {
    artifact: AudioArtifact,
    applied: FilterRequest,
}

impl FilteredPreview {
    pub fn artifact(&self) -> &AudioArtifact {
        &self.artifact
    }

    pub fn applied(&self) -> &FilterRequest {
        &self.applied
    }
}

/// One user's working state: the script, the base audio, the last preview.
///
/// Owned by the caller and passed to each operation; use cases stay stateless.
#[derive(Debug)]
pub struct StudioSession {
    text: String,
    base: Option<AudioArtifact>,
    preview: Option<FilteredPreview>,
}

impl StudioSession {
    pub fn new() -> Self {
        Self {
            text: DEFAULT_TTS_TEXT.to_string(),
            base: None,
            preview: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn base(&self) -> Option<&AudioArtifact> {
        self.base.as_ref()
    }

    pub fn preview(&self) -> Option<&FilteredPreview> {
        self.preview.as_ref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn apply_liturgical_pause(&mut self) {
        self.text = text_tools::liturgical_pause(&self.text);
    }

    pub fn apply_newline_after_period(&mut self) {
        self.text = text_tools::newline_after_period(&self.text);
    }

    pub fn correct_pronunciation(&mut self, vocabulary: &PronunciationVocabulary) {
        self.text = vocabulary.apply(&self.text);
    }

    /// Synthesizes the current text. On failure the session is unchanged.
    pub fn generate_base(
        &mut self,
        synthesis: &SynthesizeBaseUseCase,
        voice_id: &str,
    ) -> Result<&AudioArtifact, StudioError> {
        let artifact = synthesis.execute(&self.text, voice_id)?;
        self.preview = None;
        Ok(self.base.insert(artifact))
    }

    /// Uses an uploaded file as the base audio.
    pub fn load_base(&mut self, artifact: AudioArtifact) {
        self.base = Some(artifact);
        self.preview = None;
    }

    /// Renders the base through `request` into memory. A failed render
    /// clears the previous preview.
    pub fn preview_filters(
        &mut self,
        filters: &mut ApplyFiltersUseCase,
        request: &FilterRequest,
    ) -> Result<&FilteredPreview, StudioError> {
        self.preview = None;
        let base = self.base.as_ref().ok_or(StudioError::NoBaseAudio)?;

        let workspace = TempWorkspace::create(filters.temp_root()).map_err(|source| StudioError::Io {
            path: filters
                .temp_root()
                .map_or_else(std::env::temp_dir, Path::to_path_buf),
            source,
        })?;
        let rendered = render_preview(filters, &workspace, base, request);
        workspace.release();

        let artifact = rendered?;
        Ok(self.preview.insert(FilteredPreview {
            artifact,
            applied: *request,
        }))
    }

    /// Writes the filtered base to `<output_dir>/<name>.wav` and returns the path.
    ///
    /// The name is trimmed and gets a `.wav` extension unless it already has one.
    pub fn export(
        &self,
        filters: &mut ApplyFiltersUseCase,
        output_dir: &Path,
        name: &str,
        request: &FilterRequest,
    ) -> Result<PathBuf, StudioError> {
        let base = self.base.as_ref().ok_or(StudioError::NoBaseAudio)?;
        let file_name = export_file_name(name)?;

        fs::create_dir_all(output_dir).map_err(|source| StudioError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let path = output_dir.join(file_name);
        filters.execute(base, &path, request)?;
        Ok(path)
    }
}

impl Default for StudioSession {
    fn default() -> Self {
        Self::new()
    }
}

/// `audio_nova_studio_YYYYMMDD_HHMMSS` for the given local time.
pub fn default_export_name(now: NaiveDateTime) -> String {
    format!("{EXPORT_NAME_PREFIX}_{}", now.format("%Y%m%d_%H%M%S"))
}

fn export_file_name(name: &str) -> Result<String, StudioError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StudioError::EmptyExportName);
    }
    if name.contains(['/', '\\']) {
        return Err(StudioError::InvalidExportName(name.to_string()));
    }
    let suffix = format!(".{OUTPUT_EXTENSION}");
    let has_suffix = name.len() > suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix));
    if has_suffix {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{suffix}"))
    }
}

fn render_preview(
    filters: &mut ApplyFiltersUseCase,
    workspace: &TempWorkspace,
    base: &AudioArtifact,
    request: &FilterRequest,
) -> Result<AudioArtifact, StudioError> {
    let path = workspace.file(TempRole::Preview);
    filters.execute(base, &path, request)?;
    let bytes = fs::read(&path).map_err(FilterError::io(&path))?;
    Ok(filters.reader().probe(ArtifactSource::memory(bytes))?)
}
