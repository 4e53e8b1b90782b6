use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::audio::domain::audio_artifact::{ArtifactSource, AudioArtifact};
use crate::audio::domain::audio_reader::AudioReader;
use crate::synthesis::domain::speech_synthesizer::{SpeechSynthesizer, SynthesisRequest};
use crate::synthesis::domain::synthesis_error::SynthesisError;
use crate::synthesis::domain::voice_store::VoiceStore;

use super::temp_workspace::{TempRole, TempWorkspace};

/// Turns text plus a voice id into base audio held in memory.
pub struct SynthesizeBaseUseCase {
    synthesizer: Box<dyn SpeechSynthesizer>,
    voices: Box<dyn VoiceStore>,
    reader: Box<dyn AudioReader>,
    language: String,
    temp_root: Option<PathBuf>,
}

impl SynthesizeBaseUseCase {
    pub fn new(
        synthesizer: Box<dyn SpeechSynthesizer>,
        voices: Box<dyn VoiceStore>,
        reader: Box<dyn AudioReader>,
        language: impl Into<String>,
        temp_root: Option<PathBuf>,
    ) -> Self {
        Self {
            synthesizer,
            voices,
            reader,
            language: language.into(),
            temp_root,
        }
    }

    pub fn voices(&self) -> &dyn VoiceStore {
        self.voices.as_ref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Synthesizes `text` in the voice `voice_id`.
    ///
    /// Text and voice are checked before any scratch file exists. The engine
    /// writes into a per-run workspace that is removed before returning.
    pub fn execute(&self, text: &str, voice_id: &str) -> Result<AudioArtifact, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let reference = self
            .voices
            .reference_sample(voice_id)
            .ok_or_else(|| SynthesisError::VoiceNotFound {
                voice_id: voice_id.to_string(),
            })?;

        let workspace = TempWorkspace::create(self.temp_root.as_deref()).map_err(|e| {
            SynthesisError::failed(format!("could not create scratch directory: {e}"))
        })?;
        let request = SynthesisRequest {
            text,
            voice_reference: &reference,
            language: &self.language,
        };
        let result = self.synthesize_in(&workspace, &request);
        workspace.release();
        result
    }

    fn synthesize_in(
        &self,
        workspace: &TempWorkspace,
        request: &SynthesisRequest<'_>,
    ) -> Result<AudioArtifact, SynthesisError> {
        let started = Instant::now();
        let output = workspace.file(TempRole::SynthesisOutput);
        self.synthesizer.synthesize(request, &output)?;

        let bytes = read_output(&output)?;
        let artifact = self
            .reader
            .probe(ArtifactSource::memory(bytes))
            .map_err(|e| SynthesisError::failed(format!("engine output is not usable audio: {e}")))?;

        log::info!(
            "Synthesized {:.2}s of audio at {} Hz in {:.1}s",
            artifact.duration(),
            artifact.sample_rate(),
            started.elapsed().as_secs_f64()
        );
        Ok(artifact)
    }
}

fn read_output(path: &Path) -> Result<Vec<u8>, SynthesisError> {
    let bytes = fs::read(path)
        .map_err(|e| SynthesisError::failed(format!("engine produced no output file: {e}")))?;
    if bytes.is_empty() {
        return Err(SynthesisError::failed("engine produced an empty output file"));
    }
    Ok(bytes)
}
